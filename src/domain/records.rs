use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered sale from the dashboard's sales panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "producto", default)]
    pub product: Option<SaleProduct>,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "cliente", default)]
    pub customer: String,
    #[serde(default)]
    pub total: Decimal,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaleProduct {
    #[serde(rename = "nombre")]
    pub name: String,
}

/// Payload for registering a sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSale {
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "cliente")]
    pub customer: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre", alias = "usuario", default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "rol", alias = "tipo", default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cargo", default)]
    pub position: String,
    #[serde(rename = "salario", default)]
    pub salary: Decimal,
}
