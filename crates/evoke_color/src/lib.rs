//! Evoke OKLCH color utilities
//!
//! The color layer of the Evoke theming engine. Everything here is pure and
//! host independent:
//!
//! - **Parsing**: strict [`parse`] (fails fast) and lenient [`validate`]
//!   (never fails, falls back to a safe triple)
//! - **Adjustment**: lightness, chroma and hue transforms on [`OklchColor`]
//! - **Scales**: [`generate_scale`] builds a 50..950 tint/shade ramp
//! - **Fallbacks**: [`approximate_rgb`] for hosts without native OKLCH
//! - **Contrast**: [`accessible_foreground`] picks readable text colors
//!
//! # Example
//!
//! ```rust
//! use evoke_color::{parse, generate_scale, accessible_foreground, LIGHT_FOREGROUND};
//!
//! let primary = parse("oklch(0.55 0.2 250)").unwrap();
//! let hover = primary.darken();
//! assert_eq!(hover.to_string(), "0.45 0.2 250");
//!
//! let scale = generate_scale(primary);
//! assert_eq!(scale.get(500), Some(primary));
//!
//! let on_dark = accessible_foreground(scale.get(900).unwrap());
//! assert_eq!(on_dark, LIGHT_FOREGROUND);
//! ```

mod contrast;
mod error;
mod oklch;
mod rgb;
mod scale;

pub use contrast::{
    accessible_foreground, accessible_foreground_with, DARK_BACKGROUND_THRESHOLD,
    DARK_FOREGROUND, LIGHT_FOREGROUND,
};
pub use error::{ColorError, Result};
pub use oklch::{
    parse, to_css_function, validate, OklchColor, DEFAULT_CHROMA_STEP, DEFAULT_LIGHTNESS_STEP,
};
pub use rgb::{approximate_rgb, approximate_rgb_channels};
pub use scale::{generate_scale, ColorScale, SCALE_STOPS};
