//! Approximate sRGB fallback for hosts without native OKLCH support
//!
//! This runs the OKLab matrices but skips the cube and the sRGB transfer
//! curve, so the output is a cheap, stable approximation and not an exact
//! color conversion. Grays map linearly from black to white.

use crate::oklch::OklchColor;

/// Approximate 8-bit RGB channels for a color
pub fn approximate_rgb_channels(color: OklchColor) -> [u8; 3] {
    let hue = color.h().to_radians();
    let a = color.c() * hue.cos();
    let b = color.c() * hue.sin();
    let l = color.l();

    let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;

    let r = 4.076_741_662_1 * l_ - 3.307_711_591_3 * m_ + 0.230_969_929_2 * s_;
    let g = -1.268_438_004_6 * l_ + 2.609_757_401_1 * m_ - 0.341_319_396_5 * s_;
    let bl = -0.004_196_086_3 * l_ - 0.703_418_614_7 * m_ + 1.707_614_701_0 * s_;

    [to_byte(r), to_byte(g), to_byte(bl)]
}

/// Approximate CSS `rgb(r, g, b)` string for a color
pub fn approximate_rgb(color: OklchColor) -> String {
    let [r, g, b] = approximate_rgb_channels(color);
    format!("rgb({r}, {g}, {b})")
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn black_and_white_are_exact() {
        assert_eq!(approximate_rgb(OklchColor::BLACK), "rgb(0, 0, 0)");
        assert_eq!(approximate_rgb(OklchColor::WHITE), "rgb(255, 255, 255)");
    }

    #[test]
    fn grays_are_neutral() {
        let [r, g, b] = approximate_rgb_channels(OklchColor::new(0.6, 0.0, 120.0));
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(r, 153);
    }

    #[test]
    fn hue_moves_the_dominant_channel() {
        let red = approximate_rgb_channels(OklchColor::new(0.6, 0.2, 30.0));
        assert!(red[0] > red[1] && red[0] > red[2]);

        let blue = approximate_rgb_channels(OklchColor::new(0.6, 0.2, 260.0));
        assert!(blue[2] > blue[0] && blue[2] > blue[1]);
    }

    #[test]
    fn output_is_a_css_rgb_function() {
        let out = approximate_rgb(OklchColor::FALLBACK);
        assert!(out.starts_with("rgb(") && out.ends_with(')'));
        assert_eq!(out.matches(',').count(), 2);
    }
}
