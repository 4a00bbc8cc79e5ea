//! Turns service errors into notice text.
//!
//! Server rejections carry their own message, shown verbatim; every other
//! API failure gets the caller's fallback. Local rule violations use their
//! `Display` text.

use crate::admin_actor::AdminError;
use crate::api_actor::ApiError;
use crate::cart_actor::CartError;
use crate::records_actor::RecordsError;
use crate::session_actor::SessionError;

pub trait NoticeText {
    fn notice_text(&self, fallback: &str) -> String;
}

impl NoticeText for ApiError {
    fn notice_text(&self, fallback: &str) -> String {
        self.user_message(fallback)
    }
}

impl NoticeText for SessionError {
    fn notice_text(&self, fallback: &str) -> String {
        match self {
            SessionError::Api(e) => e.user_message(fallback),
            _ => fallback.to_string(),
        }
    }
}

impl NoticeText for CartError {
    fn notice_text(&self, fallback: &str) -> String {
        match self {
            CartError::Api(e) => e.user_message(fallback),
            CartError::ActorCommunication(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

impl NoticeText for AdminError {
    fn notice_text(&self, fallback: &str) -> String {
        match self {
            AdminError::Api(e) => e.user_message(fallback),
            AdminError::ActorCommunication(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

impl NoticeText for RecordsError {
    fn notice_text(&self, fallback: &str) -> String {
        match self {
            RecordsError::Api(e) => e.user_message(fallback),
            RecordsError::ActorCommunication(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}
