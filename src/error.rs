//! Error types for the answerbench crate

use thiserror::Error;

/// Result type for answerbench operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for answerbench operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing credential or invalid configuration. Fatal to a whole run.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
