use tracing::{debug, info, instrument, warn};

use super::cart::{Cart, CartLine, CartSnapshot, QuantityChange};
use super::error::CartError;
use crate::actor_framework::{reply, Service};
use crate::api_actor::ApiError;
use crate::clients::ApiClient;
use crate::domain::{Identity, Order, Product, PurchaseReceipt};
use crate::messages::CartRequest;

/// Owns the last-loaded catalog and the session's cart.
pub struct CartService {
    api: ApiClient,
    catalog: Vec<Product>,
    cart: Cart,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self { api, catalog: Vec::new(), cart: Cart::default() }
    }

    /// On failure the previous catalog is kept.
    #[instrument(skip(self))]
    async fn load_catalog(&mut self) -> Result<Vec<Product>, CartError> {
        let products = self.api.list_products().await?;
        debug!(product_count = products.len(), "Catalog loaded");
        for line in self.cart.reconcile(&products) {
            info!(product_id = %line.product.id, "Dropped cart line no longer in stock");
        }
        self.catalog = products;
        Ok(self.catalog.clone())
    }

    #[instrument(skip(self))]
    fn add_to_cart(&mut self, product_id: String) -> Result<CartLine, CartError> {
        let line = self.cart.add(&self.catalog, &product_id)?;
        debug!(quantity = line.quantity, "Added to cart");
        Ok(line)
    }

    #[instrument(skip(self))]
    fn change_quantity(&mut self, index: usize, delta: i64) -> Result<QuantityChange, CartError> {
        self.cart.change_quantity(&self.catalog, index, delta)
    }

    /// Pushes every line to the server cart, one at a time, then confirms.
    /// The first failure stops the sequence.
    async fn submit(&self, order: &Order) -> Result<PurchaseReceipt, ApiError> {
        for line in &order.lines {
            self.api.add_to_server_cart(line.clone()).await?;
        }
        self.api.confirm_purchase().await
    }

    #[instrument(fields(customer = %identity.reference()), skip(self, identity))]
    async fn checkout(&mut self, identity: Identity) -> Result<PurchaseReceipt, CartError> {
        let order = self.cart.to_order(&identity)?;
        info!(lines = order.lines.len(), total = %order.total, "Submitting order");

        let receipt = match self.submit(&order).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "Checkout failed, rolling back server cart");
                if let Err(rollback) = self.api.clear_server_cart().await {
                    warn!(error = %rollback, "Server cart rollback failed");
                }
                return Err(e.into());
            }
        };

        self.cart.clear();
        if let Err(e) = self.load_catalog().await {
            warn!(error = %e, "Catalog refresh after checkout failed");
        }
        info!(total = %receipt.total, "Order confirmed");
        Ok(receipt)
    }
}

impl Service for CartService {
    type Request = CartRequest;
    const NAME: &'static str = "cart_service";

    async fn handle(&mut self, request: CartRequest) {
        match request {
            CartRequest::LoadCatalog { respond_to } => reply(respond_to, self.load_catalog().await),
            CartRequest::AddToCart { product_id, respond_to } => reply(respond_to, self.add_to_cart(product_id)),
            CartRequest::ChangeQuantity { index, delta, respond_to } => {
                reply(respond_to, self.change_quantity(index, delta))
            }
            CartRequest::RemoveLine { index, respond_to } => reply(respond_to, self.cart.remove(index)),
            CartRequest::Checkout { identity, respond_to } => reply(respond_to, self.checkout(identity).await),
            CartRequest::Snapshot { respond_to } => reply(respond_to, Ok(self.cart.snapshot(&self.catalog))),
            CartRequest::Clear { respond_to } => {
                self.cart.clear();
                reply(respond_to, Ok(()))
            }
        }
    }
}
