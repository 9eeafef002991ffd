//! Error types for saga-search.

use thiserror::Error;

/// Result type alias using saga-search's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for saga-search operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid request input (bad mode, out-of-range limit, missing query)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required collaborator is not ready or not configured
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The similarity store rejected or failed the search call
    #[error("Backend error: {0}")]
    Backend(String),

    /// Embedding generation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Translation call failed (callers degrade, never abort, on this)
    #[error("Translation error: {0}")]
    Translation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
