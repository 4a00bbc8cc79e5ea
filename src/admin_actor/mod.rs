//! Product administration: listing, filtering, the edit form and deletion.

pub mod error;
pub mod service;

pub use error::*;
pub use service::{AdminSnapshot, PendingDelete, ProductAdminService, SaveOutcome};
