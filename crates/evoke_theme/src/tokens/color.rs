//! Color tokens for theming

use evoke_color::{approximate_rgb, parse, to_css_function, ColorError, OklchColor};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Semantic color roles shared by the component library
///
/// Themes may define additional roles; these are the ones every built-in
/// component reads.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorRole {
    // Surfaces
    Background,
    Foreground,
    Card,
    CardForeground,
    Popover,
    PopoverForeground,

    // Brand
    Primary,
    PrimaryForeground,
    Secondary,
    SecondaryForeground,

    // Neutral accents
    Muted,
    MutedForeground,
    Accent,
    AccentForeground,

    // Status
    Destructive,
    DestructiveForeground,
    Success,
    SuccessForeground,
    Warning,
    WarningForeground,

    // Form chrome
    Border,
    Input,
    Ring,
}

impl ColorRole {
    /// Every role, in declaration order
    pub const ALL: [ColorRole; 23] = [
        ColorRole::Background,
        ColorRole::Foreground,
        ColorRole::Card,
        ColorRole::CardForeground,
        ColorRole::Popover,
        ColorRole::PopoverForeground,
        ColorRole::Primary,
        ColorRole::PrimaryForeground,
        ColorRole::Secondary,
        ColorRole::SecondaryForeground,
        ColorRole::Muted,
        ColorRole::MutedForeground,
        ColorRole::Accent,
        ColorRole::AccentForeground,
        ColorRole::Destructive,
        ColorRole::DestructiveForeground,
        ColorRole::Success,
        ColorRole::SuccessForeground,
        ColorRole::Warning,
        ColorRole::WarningForeground,
        ColorRole::Border,
        ColorRole::Input,
        ColorRole::Ring,
    ];

    /// Key used in a theme's color map
    pub fn key(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Foreground => "foreground",
            Self::Card => "card",
            Self::CardForeground => "cardForeground",
            Self::Popover => "popover",
            Self::PopoverForeground => "popoverForeground",
            Self::Primary => "primary",
            Self::PrimaryForeground => "primaryForeground",
            Self::Secondary => "secondary",
            Self::SecondaryForeground => "secondaryForeground",
            Self::Muted => "muted",
            Self::MutedForeground => "mutedForeground",
            Self::Accent => "accent",
            Self::AccentForeground => "accentForeground",
            Self::Destructive => "destructive",
            Self::DestructiveForeground => "destructiveForeground",
            Self::Success => "success",
            Self::SuccessForeground => "successForeground",
            Self::Warning => "warning",
            Self::WarningForeground => "warningForeground",
            Self::Border => "border",
            Self::Input => "input",
            Self::Ring => "ring",
        }
    }
}

/// A theme color in its serialized forms
///
/// `value` is the space-separated OKLCH triple and is authoritative; `oklch`
/// is the CSS function form and `rgb` an optional approximate fallback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    pub value: String,
    #[serde(default)]
    pub oklch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<String>,
}

impl ColorToken {
    /// Build all forms from a color
    pub fn from_color(color: OklchColor) -> Self {
        Self {
            value: color.to_string(),
            oklch: color.to_css_function(),
            rgb: Some(approximate_rgb(color)),
        }
    }

    /// Strictly parse a triple or `oklch(...)` string into a token
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        parse(input).map(Self::from_color)
    }

    /// The token's color
    pub fn color(&self) -> Result<OklchColor, ColorError> {
        parse(&self.value)
    }

    /// Fill in the derived `oklch` form when a token was authored with only a value
    pub fn normalize(&mut self) {
        if self.oklch.trim().is_empty() && !self.value.trim().is_empty() {
            self.oklch = to_css_function(&self.value);
        }
    }

    /// The CSS value to emit
    ///
    /// Native OKLCH hosts get the `oklch()` form. Others get the stored `rgb`
    /// fallback, or an approximation computed from `value`; if neither is
    /// available the `oklch()` form is used anyway.
    pub fn css_value(&self, oklch_supported: bool) -> String {
        let oklch = || {
            if self.oklch.trim().is_empty() {
                to_css_function(&self.value)
            } else {
                self.oklch.clone()
            }
        };

        if oklch_supported {
            return oklch();
        }
        if let Some(rgb) = self.rgb.as_ref().filter(|rgb| !rgb.trim().is_empty()) {
            return rgb.clone();
        }
        match self.color() {
            Ok(color) => approximate_rgb(color),
            Err(err) => {
                tracing::warn!("no RGB fallback for color `{}`: {}", self.value, err);
                oklch()
            }
        }
    }
}

/// Semantic role → color token, in authoring order
pub type ColorTokens = IndexMap<String, ColorToken>;
