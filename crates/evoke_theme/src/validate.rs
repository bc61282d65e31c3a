//! Structural validation of theme records

use evoke_color::{parse, ColorError};
use thiserror::Error;

use crate::theme::RuntimeThemeConfig;
use crate::tokens::TokenMap;

/// A problem that prevents a theme from being applied
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemeIssue {
    #[error("theme name is empty")]
    EmptyName,

    #[error("color `{role}` has an empty value")]
    EmptyColorValue { role: String },

    #[error("color `{role}` is not a valid OKLCH value: {source}")]
    InvalidColorValue {
        role: String,
        #[source]
        source: ColorError,
    },

    #[error("{section} has an empty token key")]
    EmptyKey { section: String },
}

/// Check a theme for problems, returning every issue found
///
/// An empty list means the theme can be applied.
pub fn validate_theme(theme: &RuntimeThemeConfig) -> Vec<ThemeIssue> {
    let mut issues = Vec::new();

    if theme.name.trim().is_empty() {
        issues.push(ThemeIssue::EmptyName);
    }

    if let Some(colors) = &theme.colors {
        for (role, token) in colors {
            if role.trim().is_empty() {
                issues.push(empty_key("colors"));
                continue;
            }
            if token.value.trim().is_empty() {
                issues.push(ThemeIssue::EmptyColorValue { role: role.clone() });
            } else if let Err(source) = parse(&token.value) {
                issues.push(ThemeIssue::InvalidColorValue {
                    role: role.clone(),
                    source,
                });
            }
        }
    }

    if let Some(typography) = &theme.typography {
        check_keys(&mut issues, "typography.fontFamily", &typography.font_family);
        check_keys(&mut issues, "typography.fontSize", &typography.font_size);
        check_keys(&mut issues, "typography.fontWeight", &typography.font_weight);
        check_keys(&mut issues, "typography.lineHeight", &typography.line_height);
        check_keys(&mut issues, "typography.letterSpacing", &typography.letter_spacing);
    }
    if let Some(spacing) = &theme.spacing {
        check_keys(&mut issues, "spacing.spacing", &spacing.spacing);
        check_keys(&mut issues, "spacing.radius", &spacing.radius);
    }
    if let Some(motion) = &theme.motion {
        check_keys(&mut issues, "motion.duration", &motion.duration);
        check_keys(&mut issues, "motion.easing", &motion.easing);
    }
    if let Some(components) = &theme.components {
        for (component, properties) in components {
            if component.trim().is_empty() {
                issues.push(empty_key("components"));
            }
            if properties.keys().any(|key| key.trim().is_empty()) {
                issues.push(empty_key(&format!("components.{component}")));
            }
        }
    }

    issues
}

fn check_keys(issues: &mut Vec<ThemeIssue>, section: &str, map: &TokenMap) {
    if map.keys().any(|key| key.trim().is_empty()) {
        issues.push(empty_key(section));
    }
}

fn empty_key(section: &str) -> ThemeIssue {
    ThemeIssue::EmptyKey {
        section: section.to_string(),
    }
}
