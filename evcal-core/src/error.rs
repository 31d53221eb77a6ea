//! Error types for evcal.

use thiserror::Error;

/// Errors that can occur in evcal operations.
#[derive(Error, Debug)]
pub enum CalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Stored data is corrupt: {0}")]
    CorruptData(String),
}

/// Result type alias for evcal operations.
pub type CalResult<T> = Result<T, CalError>;
