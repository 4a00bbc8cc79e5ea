use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as the store API reports it. The API owns the stock count;
/// this is only the last value the client saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "plataforma", default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(rename = "genero", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "cantidad_disponible", default)]
    pub available: u32,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "plataforma")]
    pub platform: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "precio")]
    pub price: Decimal,
    #[serde(rename = "cantidad_disponible")]
    pub available: u32,
    #[serde(rename = "descripcion")]
    pub description: String,
}

/// Inventory badge shown next to the stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    Medium,
    High,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, available: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            platform: None,
            genre: None,
            price,
            available,
            description: None,
        }
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn in_stock(&self) -> bool {
        self.available > 0
    }

    pub fn stock_level(&self) -> StockLevel {
        match self.available {
            0 => StockLevel::Low,
            1..=10 => StockLevel::Medium,
            _ => StockLevel::High,
        }
    }

    /// Case-insensitive substring match over name, platform and genre.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(needle);
        contains(self.name.as_str())
            || self.platform.as_deref().is_some_and(contains)
            || self.genre.as_deref().is_some_and(contains)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_api_record() {
        let json = r#"{"_id":"P1","nombre":"Game A","plataforma":"PS5","precio":59.99,"cantidad_disponible":3}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, "P1");
        assert_eq!(product.platform.as_deref(), Some("PS5"));
        assert_eq!(product.genre, None);
        assert_eq!(product.price, Decimal::new(5999, 2));
        assert_eq!(product.available, 3);
    }

    #[test]
    fn test_missing_stock_reads_as_zero() {
        let json = r#"{"_id":"P2","nombre":"Game B","precio":10}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.in_stock());
    }

    #[test]
    fn test_stock_level_thresholds() {
        let level = |available| Product::new("P", "X", Decimal::ONE, available).stock_level();
        assert_eq!(level(0), StockLevel::Low);
        assert_eq!(level(1), StockLevel::Medium);
        assert_eq!(level(10), StockLevel::Medium);
        assert_eq!(level(11), StockLevel::High);
    }

    #[test]
    fn test_matches_optional_fields() {
        let product = Product::new("P1", "Halo Infinite", Decimal::TEN, 1).with_platform("Xbox");
        assert!(product.matches("halo"));
        assert!(product.matches("xbox"));
        assert!(!product.matches("shooter"));
    }
}
