//! Error types for orgdrill-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in orgdrill-core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The configured path column is not among the headers
    #[error("Path column not found: {0}")]
    MissingColumn(String),

    /// Invalid cell reference format
    #[error("Invalid cell reference: {0}")]
    InvalidAddress(String),

    /// Label is not selectable at this depth
    #[error("Label '{label}' is not available at level {level}")]
    UnknownLabel { label: String, level: usize },

    /// The active path is already at the deepest level
    #[error("Active path is already at the maximum depth of {0}")]
    DepthExceeded(usize),

    /// Ancestor index past the end of the active path
    #[error("Ancestor index {index} out of range (path length: {len})")]
    AncestorOutOfRange { index: usize, len: usize },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
