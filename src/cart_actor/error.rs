use thiserror::Error;

use crate::api_actor::ApiError;

/// Errors that can occur while browsing the catalog or handling the cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("{0} is out of stock")]
    OutOfStock(String),
    #[error("Only {available} units of {name} available")]
    StockExceeded { name: String, available: u32 },
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("No cart line at position {0}")]
    InvalidLine(usize),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}
