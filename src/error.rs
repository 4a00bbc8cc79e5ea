use thiserror::Error;

use crate::api_actor::ApiError;

/// Errors that end the storefront process. Everything a single command can
/// get wrong is shown as a notice instead.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Could not start the API client: {0}")]
    Startup(#[from] ApiError),
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Service task failed: {0}")]
    Shutdown(String),
}
