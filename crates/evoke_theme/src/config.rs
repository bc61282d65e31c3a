//! Theme provider configuration (evoke.toml)
//!
//! ```toml
//! default_theme = "light"
//! css_var_prefix = "ui"
//!
//! [themes.light]
//! isDark = false
//! colors.background = { value = "1 0 0" }
//! ```
//!
//! Omitting `[themes]` keeps the built-in `light`/`dark` pair; declaring it
//! replaces the pair entirely.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::theme::ThemeRegistry;
use crate::validate::validate_theme;

/// Provider configuration for a [`ThemeRuntime`](crate::ThemeRuntime)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Theme used when nothing else selects one
    #[serde(default = "default_theme")]
    pub default_theme: String,
    /// Follow the system color scheme until the user picks a theme
    #[serde(default = "default_true")]
    pub enable_system: bool,
    /// Storage key for the persisted preference
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Prefix for every emitted custom property
    #[serde(default = "default_css_var_prefix")]
    pub css_var_prefix: String,
    /// Skip transition suppression during theme switches
    #[serde(default)]
    pub disable_transitions: bool,
    #[serde(default)]
    pub themes: ThemeRegistry,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_true() -> bool {
    true
}

fn default_storage_key() -> String {
    "evoke-ui-theme".to_string()
}

fn default_css_var_prefix() -> String {
    "ui".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_theme: default_theme(),
            enable_system: true,
            storage_key: default_storage_key(),
            css_var_prefix: default_css_var_prefix(),
            disable_transitions: false,
            themes: ThemeRegistry::default(),
        }
    }
}

impl ThemeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn themes(mut self, themes: ThemeRegistry) -> Self {
        self.themes = themes;
        self
    }

    pub fn default_theme(mut self, name: impl Into<String>) -> Self {
        self.default_theme = name.into();
        self
    }

    pub fn enable_system(mut self, enable: bool) -> Self {
        self.enable_system = enable;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn css_var_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.css_var_prefix = prefix.into();
        self
    }

    pub fn disable_transitions(mut self, disable: bool) -> Self {
        self.disable_transitions = disable;
        self
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "loaded {} theme(s) from {}",
            config.themes.len(),
            path.display()
        );
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Human-readable problems that would make the runtime fall back
    ///
    /// None of these stop a runtime from starting; they explain warnings it
    /// would log.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.themes.is_empty() {
            problems.push(
                "no themes are registered; the built-in light theme will be used".to_string(),
            );
        } else if !self.themes.contains(&self.default_theme) {
            problems.push(format!(
                "default theme `{}` is not registered",
                self.default_theme
            ));
        }
        if self.css_var_prefix.trim().is_empty() {
            problems.push("css_var_prefix is empty".to_string());
        }
        if self.storage_key.trim().is_empty() {
            problems.push("storage_key is empty".to_string());
        }
        for theme in self.themes.iter() {
            for issue in validate_theme(theme) {
                problems.push(format!("theme `{}`: {}", theme.name, issue));
            }
        }

        problems
    }
}
