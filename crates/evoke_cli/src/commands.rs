//! Subcommand implementations
//!
//! Each command renders to a `String` so it can be tested without touching
//! stdout; `main` prints or writes the result.

use anyhow::{Context, Result};
use evoke_color::{accessible_foreground, approximate_rgb, generate_scale, parse};
use evoke_theme::css::{self, kebab_case};
use evoke_theme::ThemeConfig;
use std::fmt::Write;

/// Static stylesheet for one or all registered themes
pub fn css(config: &ThemeConfig, theme: Option<&str>, prefix: Option<&str>) -> Result<String> {
    let prefix = prefix.unwrap_or(&config.css_var_prefix);

    let themes = match theme {
        Some(name) => vec![config
            .themes
            .require(name)
            .with_context(|| format!("Available themes: {}", names(config)))?],
        None => config.themes.iter().collect(),
    };

    let mut out = String::new();
    for (idx, theme) in themes.into_iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "/* {} */", theme.display_label());
        out.push_str(&css::to_static_css(theme, prefix));
    }
    Ok(out)
}

/// Problems found in a configuration, one per line
///
/// Returns an error when there is at least one problem.
pub fn validate(config: &ThemeConfig) -> Result<String> {
    let problems = config.diagnostics();
    if problems.is_empty() {
        return Ok(format!("{} theme(s) OK: {}\n", config.themes.len(), names(config)));
    }

    for problem in &problems {
        tracing::warn!("{}", problem);
    }
    anyhow::bail!("{} problem(s) found:\n  {}", problems.len(), problems.join("\n  "))
}

/// Custom properties for a 50..950 tonal scale around `color`
pub fn scale(color: &str, name: &str, prefix: &str, rgb: bool) -> Result<String> {
    let base = parse(color).with_context(|| format!("Invalid base color `{color}`"))?;

    let mut out = String::new();
    for (stop, color) in generate_scale(base).iter() {
        let value = if rgb {
            approximate_rgb(color)
        } else {
            color.to_css_function()
        };
        let _ = writeln!(
            out,
            "--{}-{}-{}: {};",
            kebab_case(prefix),
            kebab_case(name),
            stop,
            value
        );
    }
    Ok(out)
}

/// Readable foreground for a background color
pub fn contrast(background: &str) -> Result<String> {
    let color = parse(background)
        .with_context(|| format!("Invalid background color `{background}`"))?;
    let foreground = accessible_foreground(color);
    let tone = if color.is_dark() { "dark" } else { "light" };
    Ok(format!(
        "background {} is {}; use foreground {}\n",
        color.to_css_function(),
        tone,
        foreground
    ))
}

/// A registered theme as pretty JSON, in the shape the runtime accepts
pub fn export(config: &ThemeConfig, name: &str) -> Result<String> {
    let theme = config
        .themes
        .require(name)
        .with_context(|| format!("Available themes: {}", names(config)))?;
    theme
        .to_json_string()
        .with_context(|| format!("Failed to serialize theme `{name}`"))
}

fn names(config: &ThemeConfig) -> String {
    config.themes.names().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use evoke_theme::{RuntimeThemeConfig, ThemeRegistry};
    use pretty_assertions::assert_eq;

    #[test]
    fn css_emits_every_theme_by_default() {
        let out = css(&ThemeConfig::default(), None, None).unwrap();
        assert!(out.contains("/* Light */\n:root {"));
        assert!(out.contains("/* Dark */\n:root.dark {"));
    }

    #[test]
    fn css_for_one_theme_and_custom_prefix() {
        let out = css(&ThemeConfig::default(), Some("dark"), Some("app")).unwrap();
        assert!(out.starts_with("/* Dark */\n:root.dark {\n"));
        assert!(out.contains("--app-color-background: oklch(0.145 0 0);"));
        assert!(!out.contains(":root {"));
    }

    #[test]
    fn css_for_unknown_theme_lists_choices() {
        let err = css(&ThemeConfig::default(), Some("sepia"), None).unwrap_err();
        assert!(format!("{err:#}").contains("light, dark"));
    }

    #[test]
    fn export_round_trips_through_json() {
        let config = ThemeConfig::default();
        let json = export(&config, "dark").unwrap();
        let theme = RuntimeThemeConfig::from_json_str(&json).unwrap();
        assert_eq!(&theme, config.themes.get("dark").unwrap());
        assert!(export(&config, "sepia").is_err());
    }

    #[test]
    fn validate_reports_problems() {
        assert_eq!(
            validate(&ThemeConfig::default()).unwrap(),
            "2 theme(s) OK: light, dark\n"
        );

        let broken = RuntimeThemeConfig::new("broken")
            .color("primary", evoke_theme::ColorToken::parse("0.5 0.1 250").unwrap())
            .color(
                "ring",
                evoke_theme::ColorToken {
                    value: String::new(),
                    oklch: String::new(),
                    rgb: None,
                },
            );
        let config = ThemeConfig::default()
            .themes(ThemeRegistry::new().with(broken))
            .default_theme("broken");
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().starts_with("1 problem(s) found"));
        assert!(err.to_string().contains("`ring`"));
    }

    #[test]
    fn scale_lists_all_stops() {
        let out = scale("0.55 0.2 250", "brandColor", "ui", false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("--ui-brand-color-50: oklch("));
        assert_eq!(lines[5], "--ui-brand-color-500: oklch(0.55 0.2 250);");

        let rgb = scale("0.55 0.2 250", "primary", "ui", true).unwrap();
        assert!(rgb.lines().all(|line| line.contains(": rgb(")));

        assert!(scale("blue", "primary", "ui", false).is_err());
    }

    #[test]
    fn contrast_picks_foreground() {
        let out = contrast("0.2 0 0").unwrap();
        assert_eq!(out, "background oklch(0.2 0 0) is dark; use foreground 0.985 0 0\n");
        assert!(contrast("oklch(0.9 0.02 90)").unwrap().ends_with("0.145 0 0\n"));
    }
}
