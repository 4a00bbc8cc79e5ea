use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use super::product::{Product, ProductDraft};

/// Raw values of the product form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub platform: String,
    pub genre: String,
    pub price: String,
    pub stock: String,
    pub description: String,
}

/// Local validation failures. Each one names the field at fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("Name is required")]
    NameRequired,
    #[error("Price must be greater than 0")]
    PriceNotPositive,
    #[error("Stock cannot be negative")]
    StockNegative,
    #[error("Stock must be a whole number of units")]
    StockNotInteger,
}

impl ProductForm {
    /// Pre-fills the form from an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            platform: product.platform.clone().unwrap_or_default(),
            genre: product.genre.clone().unwrap_or_default(),
            price: product.price.to_string(),
            stock: product.available.to_string(),
            description: product.description.clone().unwrap_or_default(),
        }
    }

    /// Checks name, then price, then stock, and builds the request payload.
    pub fn validate(&self) -> Result<ProductDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::NameRequired);
        }

        let price = Decimal::from_str(self.price.trim()).map_err(|_| FormError::PriceNotPositive)?;
        if price <= Decimal::ZERO {
            return Err(FormError::PriceNotPositive);
        }

        let stock: i64 = self.stock.trim().parse().map_err(|_| FormError::StockNotInteger)?;
        if stock < 0 {
            return Err(FormError::StockNegative);
        }
        let available = u32::try_from(stock).map_err(|_| FormError::StockNotInteger)?;

        Ok(ProductDraft {
            name: name.to_string(),
            platform: self.platform.trim().to_string(),
            genre: self.genre.trim().to_string(),
            price,
            available,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: name.into(),
            platform: "PS5".into(),
            price: price.into(),
            stock: stock.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_builds_draft() {
        let draft = form(" Game A ", "59.90", "4").validate().unwrap();
        assert_eq!(draft.name, "Game A");
        assert_eq!(draft.price, Decimal::new(5990, 2));
        assert_eq!(draft.available, 4);
        assert_eq!(draft.genre, "");
    }

    #[test]
    fn test_each_rule_names_its_field() {
        assert_eq!(form("  ", "10", "1").validate(), Err(FormError::NameRequired));
        assert_eq!(form("A", "-5", "1").validate(), Err(FormError::PriceNotPositive));
        assert_eq!(form("A", "0", "1").validate(), Err(FormError::PriceNotPositive));
        assert_eq!(form("A", "abc", "1").validate(), Err(FormError::PriceNotPositive));
        assert_eq!(form("A", "10", "-1").validate(), Err(FormError::StockNegative));
        assert_eq!(form("A", "10", "1.5").validate(), Err(FormError::StockNotInteger));
    }

    #[test]
    fn test_zero_stock_is_allowed() {
        assert_eq!(form("A", "10", "0").validate().unwrap().available, 0);
    }

    #[test]
    fn test_prefill_round_trips_through_validation() {
        let product = Product::new("P1", "Game A", Decimal::new(1999, 2), 7).with_genre("RPG");
        let draft = ProductForm::from_product(&product).validate().unwrap();
        assert_eq!(draft.price, product.price);
        assert_eq!(draft.available, 7);
        assert_eq!(draft.genre, "RPG");
    }
}
