//! Theme error types

use std::path::PathBuf;

use evoke_color::ColorError;
use evoke_platform::PlatformError;
use thiserror::Error;

use crate::validate::ThemeIssue;

/// Errors raised while loading, validating or applying themes
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Inject(#[from] InjectError),

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("unknown color scheme `{0}` (expected `light` or `dark`)")]
    UnknownScheme(String),

    #[error("invalid theme `{name}`: {}", join_issues(.issues))]
    InvalidTheme {
        name: String,
        issues: Vec<ThemeIssue>,
    },

    #[error("failed to parse theme config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize theme config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A style root rejected a write during injection or removal
#[derive(Debug, Error, Clone, PartialEq)]
#[error("failed to {operation} `{target}` on the style root: {source}")]
pub struct InjectError {
    pub operation: &'static str,
    pub target: String,
    #[source]
    pub source: PlatformError,
}

impl InjectError {
    pub(crate) fn new(operation: &'static str, target: &str, source: PlatformError) -> Self {
        Self {
            operation,
            target: target.to_string(),
            source,
        }
    }
}

fn join_issues(issues: &[ThemeIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
