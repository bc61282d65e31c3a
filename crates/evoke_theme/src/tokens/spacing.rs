//! Spacing and border radius tokens for theming

use serde::{Deserialize, Serialize};

use super::{token_map, TokenMap};

/// Steps of the spacing scale, as multiples of the base unit
const SPACING_STEPS: [(&str, f32); 12] = [
    ("0", 0.0),
    ("px", 0.0),
    ("0.5", 0.5),
    ("1", 1.0),
    ("2", 2.0),
    ("3", 3.0),
    ("4", 4.0),
    ("5", 5.0),
    ("6", 6.0),
    ("8", 8.0),
    ("10", 10.0),
    ("12", 12.0),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingTokens {
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub spacing: TokenMap,
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub radius: TokenMap,
}

impl SpacingTokens {
    /// Spacing scale built from a base unit in `rem`
    pub fn with_base_rem(base: f32) -> Self {
        let spacing = SPACING_STEPS
            .iter()
            .map(|&(key, step)| {
                let value = match key {
                    "0" => "0".to_string(),
                    "px" => "1px".to_string(),
                    _ => format!("{}rem", step * base),
                };
                (key.to_string(), value)
            })
            .collect();

        Self {
            spacing,
            radius: token_map([
                ("none", "0"),
                ("sm", "0.25rem"),
                ("md", "0.375rem"),
                ("lg", "0.5rem"),
                ("xl", "0.75rem"),
                ("full", "9999px"),
            ]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spacing.is_empty() && self.radius.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_unit_scales_every_step() {
        let tokens = SpacingTokens::with_base_rem(0.25);
        assert_eq!(tokens.spacing["0"], "0");
        assert_eq!(tokens.spacing["px"], "1px");
        assert_eq!(tokens.spacing["1"], "0.25rem");
        assert_eq!(tokens.spacing["4"], "1rem");
        assert_eq!(tokens.spacing["0.5"], "0.125rem");
        assert_eq!(tokens.radius["full"], "9999px");
    }
}
