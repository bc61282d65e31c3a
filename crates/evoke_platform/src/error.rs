//! Platform error types

use thiserror::Error;

/// Host capability errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// Capability exists but refuses access (private browsing, sandboxing)
    #[error("Capability unavailable: {0}")]
    Unavailable(String),

    /// Store rejected a write because it is full
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Key-value store operation failed
    #[error("Storage operation failed: {0}")]
    Storage(String),

    /// Style root rejected a write
    #[error("Style operation failed: {0}")]
    Style(String),

    /// Media query could not be evaluated or watched
    #[error("Media query failed: {0}")]
    MediaQuery(String),

    /// Exception thrown by the browser host
    #[error("Host exception: {0}")]
    Js(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
