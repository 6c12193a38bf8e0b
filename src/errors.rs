//! Error taxonomy for the assistant core
//!
//! Three failure classes cross the core's boundaries: rejected caller
//! input, calculator failures, and storage/export I/O. The outward
//! layers (agent, HTTP) turn all of these into plain-text replies.

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AssistantError {
    /// Caller-supplied input failed validation (empty identifiers,
    /// non-positive amounts, negative prices).
    #[error("{0}")]
    Validation(String),

    /// A calculator rejected its inputs or could not produce a result.
    #[error("{0}")]
    Computation(String),

    /// Storage or export read/write failure.
    #[error("{0}")]
    Persistence(String),
}

impl AssistantError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}

impl From<StorageError> for AssistantError {
    fn from(err: StorageError) -> Self {
        Self::Persistence(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
