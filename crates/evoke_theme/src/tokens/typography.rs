//! Typography tokens for theming

use serde::{Deserialize, Serialize};

use super::{token_map, TokenMap};

/// Font families, sizes, weights, line heights and letter spacing
///
/// Missing sections deserialize as empty maps.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyTokens {
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub font_family: TokenMap,
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub font_size: TokenMap,
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub font_weight: TokenMap,
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub line_height: TokenMap,
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub letter_spacing: TokenMap,
}

impl TypographyTokens {
    /// The stock type ramp used by the built-in themes
    pub fn standard() -> Self {
        Self {
            font_family: token_map([
                ("sans", "ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", sans-serif"),
                ("mono", "ui-monospace, SFMono-Regular, Menlo, monospace"),
            ]),
            font_size: token_map([
                ("xs", "0.75rem"),
                ("sm", "0.875rem"),
                ("base", "1rem"),
                ("lg", "1.125rem"),
                ("xl", "1.25rem"),
                ("2xl", "1.5rem"),
                ("3xl", "1.875rem"),
                ("4xl", "2.25rem"),
            ]),
            font_weight: token_map([
                ("normal", "400"),
                ("medium", "500"),
                ("semibold", "600"),
                ("bold", "700"),
            ]),
            line_height: token_map([("tight", "1.25"), ("normal", "1.5"), ("relaxed", "1.75")]),
            letter_spacing: token_map([
                ("tight", "-0.025em"),
                ("normal", "0em"),
                ("wide", "0.025em"),
            ]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.font_family.is_empty()
            && self.font_size.is_empty()
            && self.font_weight.is_empty()
            && self.line_height.is_empty()
            && self.letter_spacing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sections_deserialize() {
        let tokens: TypographyTokens =
            serde_json::from_str(r#"{"fontSize":{"base":"16px"}}"#).unwrap();
        assert_eq!(tokens.font_size.get("base").map(String::as_str), Some("16px"));
        assert!(tokens.font_family.is_empty());
        assert!(!tokens.is_empty());
        assert!(TypographyTokens::default().is_empty());
    }
}
