//! CSS custom property injection
//!
//! A theme is flattened into `--{prefix}-{category}-{key}` custom properties
//! and written onto a style root together with a `light`/`dark` class and a
//! `data-theme` attribute. The same flattening produces static CSS for
//! contexts that render ahead of time.
//!
//! | section                  | property                                   |
//! |--------------------------|--------------------------------------------|
//! | `colors.primary`         | `--ui-color-primary`                       |
//! | `typography.fontSize.lg` | `--ui-font-size-lg`                        |
//! | `spacing.spacing.4`      | `--ui-space-4`                             |
//! | `spacing.radius.md`      | `--ui-radius-md`                           |
//! | `motion.easing.inOut`    | `--ui-easing-in-out`                       |
//! | `components.button.height.sm` | `--ui-button-height-sm`               |

use std::fmt::Write as _;

use evoke_platform::StyleRoot;

use crate::error::InjectError;
use crate::theme::{ColorScheme, RuntimeThemeConfig};
use crate::tokens::{ComponentValue, TokenMap};

pub use crate::validate::{validate_theme as validate, ThemeIssue};

/// Attribute carrying the active theme name
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Custom property name and value
pub type CssVariable = (String, String);

/// Convert a token key to kebab case
///
/// `primaryForeground` → `primary-foreground`, `HTMLColor` → `html-color`,
/// `text_primary` → `text-primary`. Characters that are not ASCII
/// alphanumeric become separators, so `1.5` → `1-5`.
pub fn kebab_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if ch.is_ascii_uppercase() && idx > 0 {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.push(ch.to_ascii_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// `--{prefix}-{parts...}`, each part kebab-cased
pub fn var_name(prefix: &str, parts: &[&str]) -> String {
    let mut name = format!("--{}", kebab_case(prefix));
    for part in parts {
        name.push('-');
        name.push_str(&kebab_case(part));
    }
    name
}

/// Flatten a theme into custom properties, in emission order
///
/// Colors resolve to their `oklch()` form when `oklch_supported`, otherwise
/// to the RGB fallback.
pub fn theme_variables(
    theme: &RuntimeThemeConfig,
    prefix: &str,
    oklch_supported: bool,
) -> Vec<CssVariable> {
    let mut vars = Vec::new();

    if let Some(colors) = &theme.colors {
        for (role, token) in colors {
            vars.push((
                var_name(prefix, &["color", role.as_str()]),
                token.css_value(oklch_supported),
            ));
        }
    }

    let mut push_map = |category: &str, map: &TokenMap| {
        for (key, value) in map {
            vars.push((var_name(prefix, &[category, key.as_str()]), value.clone()));
        }
    };

    if let Some(typography) = &theme.typography {
        push_map("font-family", &typography.font_family);
        push_map("font-size", &typography.font_size);
        push_map("font-weight", &typography.font_weight);
        push_map("line-height", &typography.line_height);
        push_map("letter-spacing", &typography.letter_spacing);
    }
    if let Some(spacing) = &theme.spacing {
        push_map("space", &spacing.spacing);
        push_map("radius", &spacing.radius);
    }
    if let Some(motion) = &theme.motion {
        push_map("duration", &motion.duration);
        push_map("easing", &motion.easing);
    }

    if let Some(components) = &theme.components {
        for (component, properties) in components {
            for (property, value) in properties {
                let base = [component.as_str(), property.as_str()];
                match value {
                    ComponentValue::Single(value) => {
                        vars.push((var_name(prefix, &base), value.clone()));
                    }
                    ComponentValue::Variants(variants) => {
                        for (variant, value) in variants {
                            let name = var_name(prefix, &[base[0], base[1], variant.as_str()]);
                            vars.push((name, value.clone()));
                        }
                    }
                }
            }
        }
    }

    vars
}

/// Write a theme onto a style root
///
/// All values are computed before the first write. Afterwards the scheme
/// class is swapped and `data-theme` set. Returns the number of properties
/// written; the first rejected write aborts with an error, leaving earlier
/// writes in place.
pub fn inject(
    theme: &RuntimeThemeConfig,
    prefix: &str,
    root: &dyn StyleRoot,
    oklch_supported: bool,
) -> Result<usize, InjectError> {
    let vars = theme_variables(theme, prefix, oklch_supported);

    for (name, value) in &vars {
        tracing::trace!("{}: {}", name, value);
        root.set_property(name, value)
            .map_err(|err| InjectError::new("set", name, err))?;
    }

    let scheme = theme.scheme();
    root.remove_class(scheme.toggle().as_str())
        .map_err(|err| InjectError::new("remove class", scheme.toggle().as_str(), err))?;
    root.add_class(scheme.as_str())
        .map_err(|err| InjectError::new("add class", scheme.as_str(), err))?;
    root.set_attribute(THEME_ATTRIBUTE, &theme.name)
        .map_err(|err| InjectError::new("set", THEME_ATTRIBUTE, err))?;

    tracing::debug!(
        "injected theme `{}` ({} properties, {})",
        theme.name,
        vars.len(),
        scheme
    );
    Ok(vars.len())
}

/// Remove everything [`inject`] wrote under `prefix`
///
/// Returns the number of custom properties removed.
pub fn remove(prefix: &str, root: &dyn StyleRoot) -> Result<usize, InjectError> {
    let marker = format!("--{}-", kebab_case(prefix));
    let names: Vec<String> = root
        .property_names()
        .into_iter()
        .filter(|name| name.starts_with(&marker))
        .collect();

    for name in &names {
        root.remove_property(name)
            .map_err(|err| InjectError::new("remove", name, err))?;
    }
    for scheme in [ColorScheme::Light, ColorScheme::Dark] {
        root.remove_class(scheme.as_str())
            .map_err(|err| InjectError::new("remove class", scheme.as_str(), err))?;
    }
    root.remove_attribute(THEME_ATTRIBUTE)
        .map_err(|err| InjectError::new("remove", THEME_ATTRIBUTE, err))?;

    tracing::debug!("removed {} theme properties", names.len());
    Ok(names.len())
}

/// Static stylesheet for a theme, always using `oklch()` colors
///
/// Dark themes are scoped to `:root.dark`, everything else to `:root`.
pub fn to_static_css(theme: &RuntimeThemeConfig, prefix: &str) -> String {
    let selector = match theme.scheme() {
        ColorScheme::Dark => ":root.dark",
        ColorScheme::Light => ":root",
    };

    let mut css = String::new();
    let _ = writeln!(css, "{selector} {{");
    for (name, value) in theme_variables(theme, prefix, true) {
        let _ = writeln!(css, "  {name}: {value};");
    }
    css.push_str("}\n");
    css
}
