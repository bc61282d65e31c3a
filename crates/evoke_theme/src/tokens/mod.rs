//! Design tokens for theming
//!
//! Tokens are the atomic values a theme record carries:
//! - Colors (OKLCH, with an RGB fallback)
//! - Typography (families, sizes, weights, line heights, letter spacing)
//! - Spacing and border radii
//! - Motion durations and easings
//! - Per-component values
//!
//! Every non-color value is a CSS value string and is emitted verbatim.

mod color;
mod component;
mod motion;
mod spacing;
mod typography;

pub use color::*;
pub use component::*;
pub use motion::*;
pub use spacing::*;
pub use typography::*;

use indexmap::IndexMap;

/// Token key → CSS value, in authoring order
pub type TokenMap = IndexMap<String, String>;

pub(crate) fn token_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> TokenMap {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
