use tokio::sync::mpsc;

use crate::cart_actor::{CartError, CartLine, CartSnapshot, QuantityChange};
use crate::domain::{Identity, Product, PurchaseReceipt};
use crate::messages::CartRequest;

/// Client for the catalog/cart service.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }
}

client_method!(CartClient => fn load_catalog() -> Vec<Product> as CartRequest::LoadCatalog, Error = CartError);
client_method!(CartClient => fn add_to_cart(product_id: String) -> CartLine as CartRequest::AddToCart, Error = CartError);
client_method!(CartClient => fn change_quantity(index: usize, delta: i64) -> QuantityChange as CartRequest::ChangeQuantity, Error = CartError);
client_method!(CartClient => fn remove_line(index: usize) -> CartLine as CartRequest::RemoveLine, Error = CartError);
client_method!(CartClient => fn checkout(identity: Identity) -> PurchaseReceipt as CartRequest::Checkout, Error = CartError, skip(identity));
client_method!(CartClient => fn snapshot() -> CartSnapshot as CartRequest::Snapshot, Error = CartError);
client_method!(CartClient => fn clear() -> () as CartRequest::Clear, Error = CartError);
