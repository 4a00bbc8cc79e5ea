use thiserror::Error;

use crate::api_actor::ApiError;

/// Errors that can occur on the dashboard panels.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordsError {
    #[error("Invalid sale: {0}")]
    InvalidSale(String),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
