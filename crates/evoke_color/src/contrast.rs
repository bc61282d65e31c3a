//! Accessible foreground selection

use crate::oklch::OklchColor;

/// Canonical near-white foreground triple
pub const LIGHT_FOREGROUND: &str = "0.985 0 0";

/// Canonical near-black foreground triple
pub const DARK_FOREGROUND: &str = "0.145 0 0";

/// Lightness below which a background counts as dark
pub const DARK_BACKGROUND_THRESHOLD: f64 = 0.5;

/// Pick the canonical foreground for text drawn on `background`
pub fn accessible_foreground(background: OklchColor) -> &'static str {
    accessible_foreground_with(background, LIGHT_FOREGROUND, DARK_FOREGROUND)
}

/// Pick `light` on dark backgrounds and `dark` on light ones
pub fn accessible_foreground_with<'a>(
    background: OklchColor,
    light: &'a str,
    dark: &'a str,
) -> &'a str {
    if background.l() < DARK_BACKGROUND_THRESHOLD {
        light
    } else {
        dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_background_gets_light_text() {
        assert_eq!(
            accessible_foreground(OklchColor::new(0.1, 0.05, 250.0)),
            LIGHT_FOREGROUND
        );
    }

    #[test]
    fn light_background_gets_dark_text() {
        assert_eq!(
            accessible_foreground(OklchColor::new(0.9, 0.05, 250.0)),
            DARK_FOREGROUND
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let mid = OklchColor::new(0.5, 0.0, 0.0);
        assert_eq!(accessible_foreground_with(mid, "white", "black"), "black");
        let below = OklchColor::new(0.499, 0.0, 0.0);
        assert_eq!(accessible_foreground_with(below, "white", "black"), "white");
    }
}
