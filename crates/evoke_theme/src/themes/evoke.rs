//! Default Evoke themes
//!
//! Neutral grayscale surfaces with a blue brand accent. Foregrounds for
//! filled surfaces are picked by lightness so text stays readable when a
//! palette entry is retuned.

use evoke_color::{accessible_foreground, OklchColor};

use crate::theme::{RuntimeThemeConfig, ThemeRegistry};
use crate::tokens::*;

/// `(L, C, H)` triple
type Triple = (f64, f64, f64);

/// Light palette
pub mod light_palette {
    use super::Triple;

    pub const BACKGROUND: Triple = (1.0, 0.0, 0.0);
    pub const FOREGROUND: Triple = (0.145, 0.0, 0.0);
    pub const CARD: Triple = (1.0, 0.0, 0.0);
    pub const POPOVER: Triple = (1.0, 0.0, 0.0);
    pub const PRIMARY: Triple = (0.488, 0.243, 264.376);
    pub const SECONDARY: Triple = (0.97, 0.0, 0.0);
    pub const MUTED: Triple = (0.97, 0.0, 0.0);
    pub const MUTED_FOREGROUND: Triple = (0.556, 0.0, 0.0);
    pub const ACCENT: Triple = (0.967, 0.003, 264.542);
    pub const DESTRUCTIVE: Triple = (0.577, 0.245, 27.325);
    pub const SUCCESS: Triple = (0.627, 0.194, 149.214);
    pub const WARNING: Triple = (0.769, 0.188, 70.08);
    pub const BORDER: Triple = (0.922, 0.0, 0.0);
    pub const INPUT: Triple = (0.922, 0.0, 0.0);
    pub const RING: Triple = (0.708, 0.0, 0.0);
}

/// Dark palette
pub mod dark_palette {
    use super::Triple;

    pub const BACKGROUND: Triple = (0.145, 0.0, 0.0);
    pub const FOREGROUND: Triple = (0.985, 0.0, 0.0);
    pub const CARD: Triple = (0.205, 0.0, 0.0);
    pub const POPOVER: Triple = (0.205, 0.0, 0.0);
    pub const PRIMARY: Triple = (0.707, 0.165, 254.624);
    pub const SECONDARY: Triple = (0.269, 0.0, 0.0);
    pub const MUTED: Triple = (0.269, 0.0, 0.0);
    pub const MUTED_FOREGROUND: Triple = (0.708, 0.0, 0.0);
    pub const ACCENT: Triple = (0.279, 0.041, 260.031);
    pub const DESTRUCTIVE: Triple = (0.704, 0.191, 22.216);
    pub const SUCCESS: Triple = (0.723, 0.219, 149.579);
    pub const WARNING: Triple = (0.828, 0.189, 84.429);
    pub const BORDER: Triple = (0.275, 0.0, 0.0);
    pub const INPUT: Triple = (0.32, 0.0, 0.0);
    pub const RING: Triple = (0.556, 0.0, 0.0);
}

/// Palette entries shared by both schemes
struct Palette {
    background: Triple,
    foreground: Triple,
    card: Triple,
    popover: Triple,
    primary: Triple,
    secondary: Triple,
    muted: Triple,
    muted_foreground: Triple,
    accent: Triple,
    destructive: Triple,
    success: Triple,
    warning: Triple,
    border: Triple,
    input: Triple,
    ring: Triple,
}

/// Built-in theme constructors
pub struct EvokeTheme;

impl EvokeTheme {
    /// The `light` theme
    pub fn light() -> RuntimeThemeConfig {
        use light_palette::*;

        build(
            RuntimeThemeConfig::new("light").label("Light").dark(false),
            Palette {
                background: BACKGROUND,
                foreground: FOREGROUND,
                card: CARD,
                popover: POPOVER,
                primary: PRIMARY,
                secondary: SECONDARY,
                muted: MUTED,
                muted_foreground: MUTED_FOREGROUND,
                accent: ACCENT,
                destructive: DESTRUCTIVE,
                success: SUCCESS,
                warning: WARNING,
                border: BORDER,
                input: INPUT,
                ring: RING,
            },
            "oklch(0 0 0 / 0.5)",
        )
    }

    /// The `dark` theme
    pub fn dark() -> RuntimeThemeConfig {
        use dark_palette::*;

        build(
            RuntimeThemeConfig::new("dark").label("Dark").dark(true),
            Palette {
                background: BACKGROUND,
                foreground: FOREGROUND,
                card: CARD,
                popover: POPOVER,
                primary: PRIMARY,
                secondary: SECONDARY,
                muted: MUTED,
                muted_foreground: MUTED_FOREGROUND,
                accent: ACCENT,
                destructive: DESTRUCTIVE,
                success: SUCCESS,
                warning: WARNING,
                border: BORDER,
                input: INPUT,
                ring: RING,
            },
            "oklch(0 0 0 / 0.7)",
        )
    }

    /// A registry holding `light` then `dark`
    pub fn registry() -> ThemeRegistry {
        ThemeRegistry::default()
    }
}

fn build(theme: RuntimeThemeConfig, palette: Palette, backdrop: &str) -> RuntimeThemeConfig {
    let Palette {
        background,
        foreground,
        card,
        popover,
        primary,
        secondary,
        muted,
        muted_foreground,
        accent,
        destructive,
        success,
        warning,
        border,
        input,
        ring,
    } = palette;

    theme
        .color(ColorRole::Background.key(), token(background))
        .color(ColorRole::Foreground.key(), token(foreground))
        .color(ColorRole::Card.key(), token(card))
        .color(ColorRole::CardForeground.key(), token(foreground))
        .color(ColorRole::Popover.key(), token(popover))
        .color(ColorRole::PopoverForeground.key(), token(foreground))
        .color(ColorRole::Primary.key(), token(primary))
        .color(ColorRole::PrimaryForeground.key(), foreground_on(primary))
        .color(ColorRole::Secondary.key(), token(secondary))
        .color(ColorRole::SecondaryForeground.key(), foreground_on(secondary))
        .color(ColorRole::Muted.key(), token(muted))
        .color(ColorRole::MutedForeground.key(), token(muted_foreground))
        .color(ColorRole::Accent.key(), token(accent))
        .color(ColorRole::AccentForeground.key(), foreground_on(accent))
        .color(ColorRole::Destructive.key(), token(destructive))
        .color(ColorRole::DestructiveForeground.key(), foreground_on(destructive))
        .color(ColorRole::Success.key(), token(success))
        .color(ColorRole::SuccessForeground.key(), foreground_on(success))
        .color(ColorRole::Warning.key(), token(warning))
        .color(ColorRole::WarningForeground.key(), foreground_on(warning))
        .color(ColorRole::Border.key(), token(border))
        .color(ColorRole::Input.key(), token(input))
        .color(ColorRole::Ring.key(), token(ring))
        .typography(TypographyTokens::standard())
        .spacing(SpacingTokens::with_base_rem(0.25))
        .motion(MotionTokens::standard())
        .component("button", button())
        .component("input", input_field())
        .component("badge", badge())
        .component("modal", modal(backdrop))
}

fn token((l, c, h): Triple) -> ColorToken {
    ColorToken::from_color(OklchColor::new(l, c, h))
}

fn foreground_on((l, c, h): Triple) -> ColorToken {
    let background = OklchColor::new(l, c, h);
    ColorToken::parse(accessible_foreground(background))
        .unwrap_or_else(|_| ColorToken::from_color(OklchColor::FALLBACK))
}

fn button() -> ComponentProperties {
    ComponentProperties::from_iter([
        ("height".to_string(), [("sm", "2rem"), ("md", "2.5rem"), ("lg", "2.75rem")].into()),
        ("paddingX".to_string(), [("sm", "0.75rem"), ("md", "1rem"), ("lg", "2rem")].into()),
        ("radius".to_string(), "0.375rem".into()),
        ("fontWeight".to_string(), "500".into()),
    ])
}

fn input_field() -> ComponentProperties {
    ComponentProperties::from_iter([
        ("height".to_string(), "2.5rem".into()),
        ("borderWidth".to_string(), "1px".into()),
        ("radius".to_string(), "0.375rem".into()),
    ])
}

fn badge() -> ComponentProperties {
    ComponentProperties::from_iter([
        ("radius".to_string(), "9999px".into()),
        ("paddingX".to_string(), "0.625rem".into()),
        ("fontSize".to_string(), "0.75rem".into()),
    ])
}

fn modal(backdrop: &str) -> ComponentProperties {
    ComponentProperties::from_iter([
        ("maxWidth".to_string(), [("sm", "24rem"), ("md", "32rem"), ("lg", "48rem")].into()),
        ("radius".to_string(), "0.5rem".into()),
        ("backdrop".to_string(), backdrop.into()),
    ])
}
