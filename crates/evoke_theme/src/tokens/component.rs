//! Per-component tokens

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::TokenMap;

/// A component property: one value, or one value per variant
///
/// ```toml
/// [themes.light.components.button]
/// radius = "0.375rem"
/// height = { sm = "2rem", md = "2.5rem" }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    Single(String),
    Variants(TokenMap),
}

impl ComponentValue {
    /// Value for a variant; `None` selects a single value
    pub fn get(&self, variant: Option<&str>) -> Option<&str> {
        match (self, variant) {
            (Self::Single(value), None) => Some(value),
            (Self::Variants(variants), Some(variant)) => variants.get(variant).map(String::as_str),
            _ => None,
        }
    }
}

impl From<&str> for ComponentValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl<'a, const N: usize> From<[(&'a str, &'a str); N]> for ComponentValue {
    fn from(variants: [(&'a str, &'a str); N]) -> Self {
        Self::Variants(super::token_map(variants))
    }
}

/// Property → value for one component
pub type ComponentProperties = IndexMap<String, ComponentValue>;

/// Component → properties
pub type ComponentTokens = IndexMap<String, ComponentProperties>;
