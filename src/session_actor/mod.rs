//! Session gate: identity lookup, role checks and login/logout.

pub mod error;
pub mod gate;

pub use error::*;
pub use gate::{SessionGate, IDENTITY_KEY};
