//! OKLCH color value type
//!
//! `OklchColor` is an immutable `Copy` value. Every constructor and transform
//! goes through [`OklchColor::new`], which clamps lightness to `0..=1`, keeps
//! chroma non-negative and wraps hue into `[0, 360)`. Parsed components are
//! kept exactly; derived colors (adjustments, mixes, scale stops) are rounded
//! to six decimal places so floating point noise stays out of the serialized
//! form.

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, Result};

/// Default lightness step for [`OklchColor::lighten`] / [`OklchColor::darken`]
pub const DEFAULT_LIGHTNESS_STEP: f64 = 0.1;

/// Default chroma step for [`OklchColor::saturate`] / [`OklchColor::desaturate`]
pub const DEFAULT_CHROMA_STEP: f64 = 0.05;

const PRECISION: f64 = 1_000_000.0;

/// A color in the OKLCH space (lightness, chroma, hue)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OklchColor {
    l: f64,
    c: f64,
    h: f64,
}

impl OklchColor {
    /// Neutral mid-lightness blue, used wherever a safe fallback is needed
    pub const FALLBACK: OklchColor = OklchColor {
        l: 0.5,
        c: 0.1,
        h: 250.0,
    };

    pub const BLACK: OklchColor = OklchColor {
        l: 0.0,
        c: 0.0,
        h: 0.0,
    };

    pub const WHITE: OklchColor = OklchColor {
        l: 1.0,
        c: 0.0,
        h: 0.0,
    };

    /// Create a color, clamping and normalizing every component
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        let l = finite_or_zero(l).clamp(0.0, 1.0);
        let c = finite_or_zero(c).max(0.0);
        Self {
            l: l + 0.0,
            c: c + 0.0,
            h: wrap_hue(finite_or_zero(h)) + 0.0,
        }
    }

    /// Like [`OklchColor::new`], rounding every component to six decimals
    pub(crate) fn rounded(l: f64, c: f64, h: f64) -> Self {
        let color = Self::new(l, c, h);
        Self {
            l: round(color.l) + 0.0,
            c: round(color.c) + 0.0,
            h: wrap_hue(round(color.h)) + 0.0,
        }
    }

    /// Lightness in `0..=1`
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Chroma, always `>= 0`
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Hue in degrees, `[0, 360)`
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Whether this color reads as dark (lightness below 0.5)
    pub fn is_dark(&self) -> bool {
        self.l < 0.5
    }

    /// Strictly parse `"L C H"` or `"oklch(L C H)"`
    pub fn parse(input: &str) -> Result<Self> {
        parse(input)
    }

    /// CSS function form, `oklch(L C H)`
    pub fn to_css_function(&self) -> String {
        format!("oklch({self})")
    }

    // ========== Adjustments ==========

    /// `L' = clamp(L + delta, 0, 1)`
    #[must_use]
    pub fn adjust_lightness(self, delta: f64) -> Self {
        Self::rounded(self.l + delta, self.c, self.h)
    }

    /// `C' = max(0, C + delta)`
    #[must_use]
    pub fn adjust_chroma(self, delta: f64) -> Self {
        Self::rounded(self.l, self.c + delta, self.h)
    }

    /// Rotate hue by `degrees`; the result is always in `[0, 360)`
    #[must_use]
    pub fn rotate_hue(self, degrees: f64) -> Self {
        Self::rounded(self.l, self.c, self.h + degrees)
    }

    #[must_use]
    pub fn lighten(self) -> Self {
        self.lighten_by(DEFAULT_LIGHTNESS_STEP)
    }

    #[must_use]
    pub fn lighten_by(self, amount: f64) -> Self {
        self.adjust_lightness(amount.abs())
    }

    #[must_use]
    pub fn darken(self) -> Self {
        self.darken_by(DEFAULT_LIGHTNESS_STEP)
    }

    #[must_use]
    pub fn darken_by(self, amount: f64) -> Self {
        self.adjust_lightness(-amount.abs())
    }

    #[must_use]
    pub fn saturate(self) -> Self {
        self.saturate_by(DEFAULT_CHROMA_STEP)
    }

    #[must_use]
    pub fn saturate_by(self, amount: f64) -> Self {
        self.adjust_chroma(amount.abs())
    }

    #[must_use]
    pub fn desaturate(self) -> Self {
        self.desaturate_by(DEFAULT_CHROMA_STEP)
    }

    #[must_use]
    pub fn desaturate_by(self, amount: f64) -> Self {
        self.adjust_chroma(-amount.abs())
    }

    /// Interpolate toward `other`, hue taking the shortest arc
    ///
    /// `t` is clamped to `0..=1`; 0 returns `self`, 1 returns `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut dh = other.h - self.h;
        if dh > 180.0 {
            dh -= 360.0;
        } else if dh < -180.0 {
            dh += 360.0;
        }
        Self::rounded(
            self.l + (other.l - self.l) * t,
            self.c + (other.c - self.c) * t,
            self.h + dh * t,
        )
    }
}

impl fmt::Display for OklchColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.l, self.c, self.h)
    }
}

impl FromStr for OklchColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Strictly parse an OKLCH triple
///
/// Accepts a bare `"L C H"` triple or the CSS function form `"oklch(L C H)"`.
/// Commas are treated as separators and an `/ alpha` tail is ignored.
/// Hue outside `0..=360` is accepted with a warning and wrapped.
pub fn parse(input: &str) -> Result<OklchColor> {
    let body = unwrap_function(input)?;
    let body = match body.split_once('/') {
        Some((channels, _alpha)) => channels,
        None => body,
    };

    let tokens: Vec<&str> = body
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() != 3 {
        return Err(ColorError::invalid(
            input,
            format!("expected 3 components, found {}", tokens.len()),
        ));
    }

    let mut values = [0.0f64; 3];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        let value: f64 = token
            .parse()
            .map_err(|_| ColorError::invalid(input, format!("`{token}` is not a number")))?;
        if !value.is_finite() {
            return Err(ColorError::invalid(input, format!("`{token}` is not finite")));
        }
        *slot = value;
    }

    let [l, c, h] = values;
    if !(0.0..=1.0).contains(&l) {
        return Err(ColorError::OutOfRange {
            input: input.to_string(),
            component: "lightness",
            value: l,
            expected: "0..=1",
        });
    }
    if c < 0.0 {
        return Err(ColorError::OutOfRange {
            input: input.to_string(),
            component: "chroma",
            value: c,
            expected: ">= 0",
        });
    }
    if !(0.0..=360.0).contains(&h) {
        tracing::warn!("OKLCH hue {} in `{}` is outside 0..=360, wrapping", h, input);
    }

    Ok(OklchColor::new(l, c, h))
}

/// Leniently coerce any input into a well-formed `"L C H"` triple
///
/// Never fails: components are clamped and normalized, and input that can't
/// be read at all yields `"0.5 0.1 250"`.
pub fn validate(input: &str) -> String {
    match read_components(input) {
        Some([l, c, h]) => OklchColor::new(l, c, h).to_string(),
        None => {
            tracing::warn!(
                "unparsable OKLCH value `{}`, using {}",
                input,
                OklchColor::FALLBACK
            );
            OklchColor::FALLBACK.to_string()
        }
    }
}

/// Wrap a triple as `oklch(...)`; already wrapped input is returned as is
pub fn to_css_function(input: &str) -> String {
    let trimmed = input.trim();
    if has_function_prefix(trimmed) {
        trimmed.to_string()
    } else {
        format!("oklch({trimmed})")
    }
}

fn read_components(input: &str) -> Option<[f64; 3]> {
    let body = unwrap_function(input).ok()?;
    let body = body.split_once('/').map_or(body, |(channels, _)| channels);
    let mut numbers = body
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()));

    let l = numbers.next()??;
    let c = numbers.next()??;
    let h = numbers.next()??;
    Some([l, c, h])
}

fn has_function_prefix(s: &str) -> bool {
    s.get(..6)
        .map(|prefix| prefix.eq_ignore_ascii_case("oklch("))
        .unwrap_or(false)
}

fn unwrap_function(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if !has_function_prefix(trimmed) {
        return Ok(trimmed);
    }
    trimmed[6..]
        .strip_suffix(')')
        .ok_or_else(|| ColorError::invalid(input, "missing closing parenthesis"))
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// `[0, 360)`; `rem_euclid` can return 360 for tiny negative inputs
fn wrap_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn round(v: f64) -> f64 {
    (v * PRECISION).round() / PRECISION
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_bare_and_wrapped_triples() {
        let bare = parse("0.6 0.2 250").unwrap();
        let wrapped = parse("  oklch(0.6 0.2 250) ").unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.l(), 0.6);
        assert_eq!(bare.c(), 0.2);
        assert_eq!(bare.h(), 250.0);

        let upper = parse("OKLCH(0.6 0.2 250 / 0.5)").unwrap();
        assert_eq!(upper, bare);
    }

    #[test]
    fn reserializes_valid_triples_unchanged() {
        for input in [
            "0.5 0.1 250",
            "0 0 0",
            "1 0.37 359.5",
            "0.985 0 0",
            "0.145 0.012 12.25",
            "0.1234567 0.0123456789 120.1234567",
            "0.98765432101 0.3 359.99999999",
        ] {
            assert_eq!(parse(input).unwrap().to_string(), input);
        }
    }

    #[test]
    fn adjustments_round_away_float_noise() {
        let base = parse("0.1234567 0.1 250").unwrap();
        assert_eq!(base.lighten_by(0.1).to_string(), "0.223457 0.1 250");
        assert_eq!(
            OklchColor::new(0.7, 0.1, 250.0).lighten_by(0.2).to_string(),
            "0.9 0.1 250"
        );
        assert_eq!(
            OklchColor::new(0.5, 0.1, 359.9999999).rotate_hue(0.0).h(),
            0.0
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            parse("0.5 0.1"),
            Err(ColorError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("0.5 blue 250"),
            Err(ColorError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("oklch(0.5 0.1 250"),
            Err(ColorError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("NaN 0.1 250"),
            Err(ColorError::InvalidFormat { .. })
        ));
        assert!(matches!(parse(""), Err(ColorError::InvalidFormat { .. })));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(
            parse("0.5 0.1 250 banana"),
            Err(ColorError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse("oklch(0.5 0.1 250 0.4)"),
            Err(ColorError::InvalidFormat { .. })
        ));
        // An alpha tail is still allowed
        assert!(parse("oklch(0.5 0.1 250 / 0.4)").is_ok());
    }

    #[test]
    fn rejects_out_of_range_lightness_and_chroma() {
        assert!(matches!(
            parse("1.2 0.1 250"),
            Err(ColorError::OutOfRange {
                component: "lightness",
                ..
            })
        ));
        assert!(matches!(
            parse("0.5 -0.1 250"),
            Err(ColorError::OutOfRange {
                component: "chroma",
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_hue_is_accepted_and_wrapped() {
        let color = parse("0.5 0.1 400").unwrap();
        assert_eq!(color.h(), 40.0);
    }

    #[test]
    fn css_function_wrapping_is_idempotent() {
        assert_eq!(to_css_function("0.5 0.1 250"), "oklch(0.5 0.1 250)");
        assert_eq!(to_css_function("oklch(0.5 0.1 250)"), "oklch(0.5 0.1 250)");
        assert_eq!(
            to_css_function(&to_css_function("0.5 0.1 250")),
            "oklch(0.5 0.1 250)"
        );
        assert_eq!(
            OklchColor::new(0.5, 0.1, 250.0).to_css_function(),
            "oklch(0.5 0.1 250)"
        );
    }

    #[test]
    fn lightness_round_trip_in_interior() {
        let base = OklchColor::new(0.5, 0.1, 250.0);
        let back = base.adjust_lightness(0.2).adjust_lightness(-0.2);
        assert!(approx(back.l(), base.l()));
    }

    #[test]
    fn lightness_clamps_at_boundaries() {
        let base = OklchColor::new(0.9, 0.1, 250.0);
        let up = base.adjust_lightness(0.3);
        assert_eq!(up.l(), 1.0);
        // Clamping lost information, so the inverse doesn't return to 0.9
        assert!(approx(up.adjust_lightness(-0.3).l(), 0.7));

        assert_eq!(OklchColor::new(0.1, 0.1, 0.0).darken_by(0.5).l(), 0.0);
    }

    #[test]
    fn chroma_never_goes_negative() {
        let base = OklchColor::new(0.5, 0.02, 250.0);
        assert_eq!(base.desaturate().c(), 0.0);
        assert!(approx(base.saturate().c(), 0.07));
        assert!(approx(base.adjust_chroma(0.1).c(), 0.12));
    }

    #[test]
    fn hue_rotation_wraps_and_inverts() {
        let base = OklchColor::new(0.5, 0.1, 250.0);
        assert_eq!(base.rotate_hue(180.0).h(), 70.0);
        assert_eq!(base.rotate_hue(-300.0).h(), 310.0);

        for degrees in [0.0, 37.3, 110.0, 359.0, 720.5, -45.25, -1000.0] {
            let back = base.rotate_hue(degrees).rotate_hue(-degrees);
            assert!(
                approx(back.h(), base.h()),
                "rotate by {degrees} returned {}",
                back.h()
            );
        }
    }

    #[test]
    fn named_wrappers_use_default_steps() {
        let base = OklchColor::new(0.5, 0.1, 250.0);
        assert!(approx(base.lighten().l(), 0.6));
        assert!(approx(base.darken().l(), 0.4));
        assert!(approx(base.saturate().c(), 0.15));
        assert!(approx(base.desaturate().c(), 0.05));
        // Sign is fixed by the name
        assert!(approx(base.darken_by(-0.2).l(), 0.3));
    }

    #[test]
    fn lenient_validation_clamps_and_falls_back() {
        assert_eq!(validate("1.5 -0.2 370"), "1 0 10");
        assert_eq!(validate("oklch(0.4 0.1 -30)"), "0.4 0.1 330");
        assert_eq!(validate("garbage"), "0.5 0.1 250");
        assert_eq!(validate(""), "0.5 0.1 250");
        assert_eq!(validate("0.5 0.1"), "0.5 0.1 250");

        for input in ["garbage", "1 2", "oklch(", "-4 9 -721", "0.2 0.3 1e3"] {
            let out = validate(input);
            let color = parse(&out).unwrap();
            assert!((0.0..=1.0).contains(&color.l()));
            assert!(color.c() >= 0.0);
            assert!((0.0..360.0).contains(&color.h()));
        }
    }

    #[test]
    fn mix_takes_shortest_hue_arc() {
        let a = OklchColor::new(0.2, 0.1, 350.0);
        let b = OklchColor::new(0.6, 0.2, 10.0);
        let mid = a.mix(b, 0.5);
        assert!(approx(mid.l(), 0.4));
        assert!(approx(mid.c(), 0.15));
        assert_eq!(mid.h(), 0.0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }
}
