//! Crate-level error types.
//!
//! [`BullionError`] covers the failures that can stop the application
//! (configuration, terminal I/O, serialization, timestamp parsing). Price
//! request failures are not errors in this sense: they travel in-band as
//! [`Quote::Failure`](crate::models::quote::Quote::Failure).

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BullionError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum BullionError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A displayed timestamp could not be parsed back.
    #[error("timestamp error: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

impl From<std::io::Error> for BullionError {
    fn from(err: std::io::Error) -> Self {
        BullionError::Io(err.to_string())
    }
}
