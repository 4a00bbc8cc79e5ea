use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A checkout submission built from the cart. Never modified once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub customer: String,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

/// One product line of an order, in the shape the server-side cart accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    #[serde(rename = "producto_id")]
    pub product_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(skip)]
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// What the API answers when a purchase is confirmed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseReceipt {
    pub total: Decimal,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
}
