//! Error types for the REST and metadata clients

use thiserror::Error;

/// Result type alias using [`TableauError`]
pub type Result<T> = std::result::Result<T, TableauError>;

/// Errors that can occur talking to the server or writing results
#[derive(Debug, Error)]
pub enum TableauError {
    /// Transport-level failure (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An authenticated call was made before signing in
    #[error("Not signed in")]
    NotSignedIn,

    /// Invalid server URL, API version, or query argument
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
