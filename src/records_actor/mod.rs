//! Dashboard panels for sales, user accounts and employees.

pub mod error;
pub mod service;

pub use error::*;
pub use service::RecordsService;
