//! Theme records and the theme registry

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ThemeError;
use crate::themes::EvokeTheme;
use crate::tokens::{
    ColorRole, ColorToken, ColorTokens, ComponentProperties, ComponentTokens, MotionTokens,
    SpacingTokens, TypographyTokens,
};

/// Light or dark presentation
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Root class, stored value and built-in theme name for this scheme
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeError::UnknownScheme(s.to_string())),
        }
    }
}

/// A complete named theme
///
/// Only `name` is required; every token section is optional and an absent
/// section simply emits no variables. Field names follow the camelCase
/// convention shared with persisted and JSON-authored themes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeThemeConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionTokens>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentTokens>,
}

impl RuntimeThemeConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn dark(mut self, is_dark: bool) -> Self {
        self.is_dark = Some(is_dark);
        self
    }

    /// Add or replace a color by role key
    pub fn color(mut self, role: impl Into<String>, token: ColorToken) -> Self {
        self.colors
            .get_or_insert_with(IndexMap::new)
            .insert(role.into(), token);
        self
    }

    pub fn typography(mut self, typography: TypographyTokens) -> Self {
        self.typography = Some(typography);
        self
    }

    pub fn spacing(mut self, spacing: SpacingTokens) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn motion(mut self, motion: MotionTokens) -> Self {
        self.motion = Some(motion);
        self
    }

    /// Add or replace one component's properties
    pub fn component(
        mut self,
        component: impl Into<String>,
        properties: ComponentProperties,
    ) -> Self {
        self.components
            .get_or_insert_with(IndexMap::new)
            .insert(component.into(), properties);
        self
    }

    /// Presentation scheme; absent `is_dark` means light
    pub fn scheme(&self) -> ColorScheme {
        if self.is_dark.unwrap_or(false) {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }

    /// Human-readable label, falling back to the name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Look up a color by role key
    pub fn color_token(&self, role: &str) -> Option<&ColorToken> {
        self.colors.as_ref()?.get(role)
    }

    pub fn role(&self, role: ColorRole) -> Option<&ColorToken> {
        self.color_token(role.key())
    }

    /// Fill in derived color forms
    pub fn normalize(&mut self) {
        if let Some(colors) = self.colors.as_mut() {
            colors.values_mut().for_each(ColorToken::normalize);
        }
    }

    /// Parse a single theme from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ThemeError> {
        let mut theme: Self = serde_json::from_str(json)?;
        theme.normalize();
        Ok(theme)
    }

    pub fn to_json_string(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Registered themes keyed by name, in registration order
///
/// Registration order is the cycle order used by theme toggling. The default
/// registry holds the built-in `light` and `dark` themes.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThemeRegistry {
    themes: IndexMap<String, RuntimeThemeConfig>,
}

impl ThemeRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            themes: IndexMap::new(),
        }
    }

    /// Register a theme under its name, replacing any theme of the same name
    pub fn insert(&mut self, theme: RuntimeThemeConfig) -> Option<RuntimeThemeConfig> {
        self.themes.insert(theme.name.clone(), theme)
    }

    /// Register a theme only if it passes validation
    pub fn try_insert(&mut self, theme: RuntimeThemeConfig) -> Result<(), ThemeError> {
        let issues = crate::validate::validate_theme(&theme);
        if !issues.is_empty() {
            return Err(ThemeError::InvalidTheme {
                name: theme.name,
                issues,
            });
        }
        self.insert(theme);
        Ok(())
    }

    pub fn with(mut self, theme: RuntimeThemeConfig) -> Self {
        self.insert(theme);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<RuntimeThemeConfig> {
        self.themes.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&RuntimeThemeConfig> {
        self.themes.get(name)
    }

    /// Look up a theme, failing for unregistered names
    pub fn require(&self, name: &str) -> Result<&RuntimeThemeConfig, ThemeError> {
        self.get(name)
            .ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuntimeThemeConfig> {
        self.themes.values()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// The theme after `name` in registration order, wrapping around
    ///
    /// An unregistered `name` starts the cycle from the first theme.
    pub fn next_after(&self, name: &str) -> Option<&str> {
        if self.themes.is_empty() {
            return None;
        }
        let next = match self.themes.get_index_of(name) {
            Some(idx) => (idx + 1) % self.themes.len(),
            None => 0,
        };
        self.themes.get_index(next).map(|(key, _)| key.as_str())
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
            .with(EvokeTheme::light())
            .with(EvokeTheme::dark())
    }
}

impl FromIterator<RuntimeThemeConfig> for ThemeRegistry {
    fn from_iter<I: IntoIterator<Item = RuntimeThemeConfig>>(iter: I) -> Self {
        let mut registry = Self::new();
        for theme in iter {
            registry.insert(theme);
        }
        registry
    }
}

impl<'de> Deserialize<'de> for ThemeRegistry {
    /// Map keys are authoritative: an empty `name` takes the key, a
    /// mismatched one is overwritten with a warning.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, RuntimeThemeConfig>::deserialize(deserializer)?;
        let themes = raw
            .into_iter()
            .map(|(key, mut theme)| {
                if theme.name.is_empty() {
                    theme.name = key.clone();
                } else if theme.name != key {
                    tracing::warn!(
                        "theme registered as `{}` declares name `{}`; using `{}`",
                        key,
                        theme.name,
                        key
                    );
                    theme.name = key.clone();
                }
                theme.normalize();
                (key, theme)
            })
            .collect();
        Ok(Self { themes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scheme_round_trips_through_strings() {
        assert_eq!("dark".parse::<ColorScheme>().unwrap(), ColorScheme::Dark);
        assert_eq!(" Light ".parse::<ColorScheme>().unwrap(), ColorScheme::Light);
        assert!("sepia".parse::<ColorScheme>().is_err());
        assert_eq!(ColorScheme::Light.toggle(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.to_string(), "dark");
    }

    #[test]
    fn absent_is_dark_means_light() {
        let theme = RuntimeThemeConfig::new("paper");
        assert_eq!(theme.scheme(), ColorScheme::Light);
        assert_eq!(theme.display_label(), "paper");
        assert_eq!(theme.clone().dark(true).scheme(), ColorScheme::Dark);
    }

    #[test]
    fn json_themes_use_camel_case() {
        let theme = RuntimeThemeConfig::from_json_str(
            r#"{
                "name": "ocean",
                "isDark": true,
                "colors": { "primaryForeground": { "value": "0.9 0.02 220" } },
                "typography": { "fontSize": { "base": "15px" } }
            }"#,
        )
        .unwrap();

        assert_eq!(theme.scheme(), ColorScheme::Dark);
        let token = theme.color_token("primaryForeground").unwrap();
        assert_eq!(token.oklch, "oklch(0.9 0.02 220)");
        assert_eq!(theme.typography.unwrap().font_size["base"], "15px");
    }

    #[test]
    fn default_registry_is_light_then_dark() {
        let registry = ThemeRegistry::default();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["light", "dark"]);
        assert_eq!(registry.get("dark").unwrap().scheme(), ColorScheme::Dark);
    }

    #[test]
    fn next_after_wraps_in_registration_order() {
        let registry: ThemeRegistry = ["light", "dark", "sepia"]
            .into_iter()
            .map(RuntimeThemeConfig::new)
            .collect();

        assert_eq!(registry.next_after("light"), Some("dark"));
        assert_eq!(registry.next_after("dark"), Some("sepia"));
        assert_eq!(registry.next_after("sepia"), Some("light"));
        assert_eq!(registry.next_after("missing"), Some("light"));
        assert_eq!(ThemeRegistry::new().next_after("light"), None);
    }

    #[test]
    fn registry_keys_override_names() {
        let registry: ThemeRegistry = serde_json::from_str(
            r#"{ "a": { "name": "" }, "b": { "name": "other" }, "c": {} }"#,
        )
        .unwrap();
        let names: Vec<&str> = registry.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn try_insert_rejects_invalid_themes() {
        let mut registry = ThemeRegistry::new();
        let nameless = RuntimeThemeConfig::new("")
            .color("primary", ColorToken::parse("0.5 0.1 250").unwrap());
        let err = registry.try_insert(nameless).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidTheme { .. }));
        assert!(registry.is_empty());
    }
}
