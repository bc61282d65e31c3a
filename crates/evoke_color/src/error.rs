//! Color error types

use thiserror::Error;

/// Errors raised by strict OKLCH parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Input is not a recognizable `L C H` triple
    #[error("invalid OKLCH format `{input}`: {reason}")]
    InvalidFormat { input: String, reason: String },

    /// A component is numeric but outside its allowed range
    #[error("OKLCH {component} out of range in `{input}`: {value} (expected {expected})")]
    OutOfRange {
        input: String,
        component: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl ColorError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for color operations
pub type Result<T> = std::result::Result<T, ColorError>;
