use thiserror::Error;

use crate::api_actor::ApiError;
use crate::domain::FormError;

/// Errors that can occur while administering products.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error(transparent)]
    Validation(#[from] FormError),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Deletion of {0} was not confirmed")]
    DeleteNotConfirmed(String),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
