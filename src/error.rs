//! Error types for the widget and its backend client.

use thiserror::Error;

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend, or the raw body.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
