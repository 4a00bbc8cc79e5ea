//! Catalog browsing, the shopping cart and checkout.

pub mod cart;
pub mod error;
pub mod service;

pub use cart::{Cart, CartLine, CartSnapshot, QuantityChange};
pub use error::*;
pub use service::CartService;
