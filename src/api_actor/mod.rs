//! Gateway to the external store REST API.

pub mod error;
pub mod routes;
pub mod service;

pub use error::*;
pub use service::ApiService;
