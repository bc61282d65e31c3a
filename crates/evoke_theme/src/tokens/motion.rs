//! Motion tokens for theming

use serde::{Deserialize, Serialize};

use super::{token_map, TokenMap};

/// Durations and easing curves
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTokens {
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub duration: TokenMap,
    #[serde(skip_serializing_if = "TokenMap::is_empty")]
    pub easing: TokenMap,
}

impl MotionTokens {
    pub fn standard() -> Self {
        Self {
            duration: token_map([
                ("instant", "0ms"),
                ("fast", "150ms"),
                ("normal", "200ms"),
                ("slow", "300ms"),
                ("slower", "500ms"),
            ]),
            easing: token_map([
                ("linear", "linear"),
                ("standard", "cubic-bezier(0.4, 0, 0.2, 1)"),
                ("in", "cubic-bezier(0.4, 0, 1, 1)"),
                ("out", "cubic-bezier(0, 0, 0.2, 1)"),
                ("inOut", "cubic-bezier(0.4, 0, 0.6, 1)"),
            ]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.duration.is_empty() && self.easing.is_empty()
    }
}
