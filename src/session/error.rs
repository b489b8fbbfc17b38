//! Error types for the session store.

use thiserror::Error;

use crate::api::ReviewError;
use crate::persistence::PersistenceError;

/// Errors surfaced by session storage backends.
///
/// Corrupt persisted JSON is not an error: the store recovers from it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The storage backend failed to read or write a slot.
    #[error("session storage failed: {message}")]
    Storage {
        /// Error detail from the backend.
        message: String,
    },

    /// A user profile could not be serialised.
    #[error("failed to serialise user profile: {message}")]
    Serialise {
        /// Error detail from `serde_json`.
        message: String,
    },
}

impl From<PersistenceError> for SessionError {
    fn from(error: PersistenceError) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

impl From<SessionError> for ReviewError {
    fn from(error: SessionError) -> Self {
        Self::Session {
            message: error.to_string(),
        }
    }
}
