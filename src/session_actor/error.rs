use thiserror::Error;

use crate::api_actor::ApiError;

/// Errors that can occur during login, registration and session checks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Session storage error: {0}")]
    Storage(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<crate::storage::StorageError> for SessionError {
    fn from(error: crate::storage::StorageError) -> Self {
        SessionError::Storage(error.to_string())
    }
}
