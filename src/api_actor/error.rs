use thiserror::Error;

/// Errors talking to the store API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Request rejected ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl ApiError {
    /// The server's own message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { message: Some(message), .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
