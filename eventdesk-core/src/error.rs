//! Error types for eventdesk.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur in eventdesk operations.
#[derive(Error, Debug)]
pub enum EventDeskError {
    /// The request could not complete or returned a non-success status.
    #[error("{0}")]
    Network(String),

    /// Form input rejected before submission.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced event is not in the current store.
    #[error("{0}")]
    NotFound(String),

    /// Persisted session data could not be read back.
    #[error("Session storage corrupted: {0}")]
    StorageCorruption(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for EventDeskError {
    fn from(err: reqwest::Error) -> Self {
        EventDeskError::Network(err.to_string())
    }
}

/// Result type alias for eventdesk operations.
pub type CoreResult<T> = Result<T, EventDeskError>;
