//! Tonal scale generation
//!
//! Produces a conventional 50..950 tint/shade ramp around a base color. This
//! mirrors the ramps used by utility CSS palettes; it is not a colorimetric
//! algorithm.

use crate::oklch::OklchColor;

/// The stops of a tonal scale, lightest first
pub const SCALE_STOPS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// How a single stop is derived from the base
#[derive(Clone, Copy, Debug)]
struct StopRule {
    stop: u16,
    lightness_delta: f64,
    chroma_factor: f64,
    /// Lower bound for lightness on shades
    floor: f64,
}

const RULES: [StopRule; 11] = [
    StopRule {
        stop: 50,
        lightness_delta: 0.40,
        chroma_factor: 0.1,
        floor: 0.0,
    },
    StopRule {
        stop: 100,
        lightness_delta: 0.35,
        chroma_factor: 0.2,
        floor: 0.0,
    },
    StopRule {
        stop: 200,
        lightness_delta: 0.25,
        chroma_factor: 0.4,
        floor: 0.0,
    },
    StopRule {
        stop: 300,
        lightness_delta: 0.15,
        chroma_factor: 0.6,
        floor: 0.0,
    },
    StopRule {
        stop: 400,
        lightness_delta: 0.07,
        chroma_factor: 0.8,
        floor: 0.0,
    },
    StopRule {
        stop: 500,
        lightness_delta: 0.0,
        chroma_factor: 1.0,
        floor: 0.0,
    },
    StopRule {
        stop: 600,
        lightness_delta: -0.08,
        chroma_factor: 1.05,
        floor: 0.1,
    },
    StopRule {
        stop: 700,
        lightness_delta: -0.16,
        chroma_factor: 1.1,
        floor: 0.1,
    },
    StopRule {
        stop: 800,
        lightness_delta: -0.24,
        chroma_factor: 1.0,
        floor: 0.08,
    },
    StopRule {
        stop: 900,
        lightness_delta: -0.32,
        chroma_factor: 0.85,
        floor: 0.05,
    },
    StopRule {
        stop: 950,
        lightness_delta: -0.38,
        chroma_factor: 0.7,
        floor: 0.05,
    },
];

/// An 11-stop tonal scale
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    colors: [OklchColor; 11],
}

impl ColorScale {
    /// Color at a given stop (`50`, `100`, ..., `950`)
    pub fn get(&self, stop: u16) -> Option<OklchColor> {
        SCALE_STOPS
            .iter()
            .position(|s| *s == stop)
            .map(|idx| self.colors[idx])
    }

    /// The unchanged base color (stop 500)
    pub fn base(&self) -> OklchColor {
        self.colors[5]
    }

    /// `(stop, color)` pairs, lightest first
    pub fn iter(&self) -> impl Iterator<Item = (u16, OklchColor)> + '_ {
        SCALE_STOPS.iter().copied().zip(self.colors.iter().copied())
    }
}

/// Generate a tonal scale; stop 500 is `base` exactly
pub fn generate_scale(base: OklchColor) -> ColorScale {
    let colors = RULES.map(|rule| derive_stop(base, rule));
    ColorScale { colors }
}

fn derive_stop(base: OklchColor, rule: StopRule) -> OklchColor {
    match rule.stop {
        500 => base,
        s if s < 500 => OklchColor::rounded(
            base.l() + rule.lightness_delta,
            base.c() * rule.chroma_factor,
            base.h(),
        ),
        _ => {
            // Shades never end up lighter than the base, even for very dark bases
            let l = (base.l() + rule.lightness_delta)
                .max(rule.floor)
                .min(base.l());
            OklchColor::rounded(l, base.c() * rule.chroma_factor, base.h())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_500_is_the_base() {
        for base in [
            OklchColor::new(0.6, 0.2, 250.0),
            OklchColor::new(0.0, 0.0, 0.0),
            OklchColor::new(1.0, 0.37, 359.9),
            OklchColor::new(0.123457, 0.05, 12.5),
        ] {
            let scale = generate_scale(base);
            assert_eq!(scale.get(500), Some(base));
            assert_eq!(scale.base(), base);
        }
    }

    #[test]
    fn tints_get_lighter_and_less_chromatic() {
        let base = OklchColor::new(0.55, 0.2, 250.0);
        let scale = generate_scale(base);

        let tints: Vec<OklchColor> = [50, 100, 200, 300, 400]
            .iter()
            .map(|s| scale.get(*s).unwrap())
            .collect();
        for pair in tints.windows(2) {
            assert!(pair[0].l() >= pair[1].l());
            assert!(pair[0].c() < pair[1].c());
        }
        assert!((scale.get(50).unwrap().c() - 0.02).abs() < 1e-9);
        assert!((scale.get(400).unwrap().c() - 0.16).abs() < 1e-9);
        assert!(scale.get(400).unwrap().l() > base.l());
    }

    #[test]
    fn shades_get_darker_with_chroma_peaking_at_700() {
        let base = OklchColor::new(0.55, 0.2, 250.0);
        let scale = generate_scale(base);

        let shades: Vec<OklchColor> = [600, 700, 800, 900, 950]
            .iter()
            .map(|s| scale.get(*s).unwrap())
            .collect();
        for pair in shades.windows(2) {
            assert!(pair[0].l() >= pair[1].l());
        }
        let peak = scale.get(700).unwrap().c();
        assert!(shades.iter().all(|c| c.c() <= peak));
        assert!(scale.get(950).unwrap().c() < base.c());
    }

    #[test]
    fn shades_respect_lightness_floor() {
        let scale = generate_scale(OklchColor::new(0.2, 0.1, 30.0));
        assert_eq!(scale.get(700).unwrap().l(), 0.1);
        assert_eq!(scale.get(950).unwrap().l(), 0.05);
        assert!(scale.iter().all(|(_, c)| c.l() >= 0.0));

        // Very dark bases are not lightened by the floor
        let scale = generate_scale(OklchColor::new(0.03, 0.1, 30.0));
        assert_eq!(scale.get(600).unwrap().l(), 0.03);
    }

    #[test]
    fn unknown_stop_is_none() {
        let scale = generate_scale(OklchColor::FALLBACK);
        assert_eq!(scale.get(550), None);
        assert_eq!(scale.iter().count(), SCALE_STOPS.len());
        // Hue is preserved across the whole ramp
        assert!(scale.iter().all(|(_, c)| c.h() == 250.0));
    }
}
