use rust_decimal::Decimal;

use super::error::CartError;
use crate::domain::{Identity, Order, OrderLine, Product};

/// A product snapshot plus the quantity requested. `1 <= quantity <= available`.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Result of a quantity change: the line either survives or drops out.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    Updated(CartLine),
    Removed(CartLine),
}

/// Everything the shop screen needs to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSnapshot {
    pub catalog: Vec<Product>,
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: u32,
}

/// Ordered cart lines, unique by product id. Stock checks are made against
/// the catalog passed in, which is the last one fetched from the server.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Adds one unit of `product_id`, creating the line if needed.
    pub fn add(&mut self, catalog: &[Product], product_id: &str) -> Result<CartLine, CartError> {
        let product = catalog
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()))?;

        if !product.in_stock() {
            return Err(CartError::OutOfStock(product.name.clone()));
        }

        match self.lines.iter_mut().find(|line| line.product.id == product_id) {
            Some(line) => {
                if line.quantity >= product.available {
                    return Err(CartError::StockExceeded {
                        name: product.name.clone(),
                        available: product.available,
                    });
                }
                line.quantity += 1;
                line.product = product.clone();
                Ok(line.clone())
            }
            None => {
                let line = CartLine { product: product.clone(), quantity: 1 };
                self.lines.push(line.clone());
                Ok(line)
            }
        }
    }

    /// Applies `delta` to the line at `index`. Dropping to zero or below
    /// removes the line. Raising it above the available stock is rejected;
    /// lowering it lands on the available stock at most.
    pub fn change_quantity(
        &mut self,
        catalog: &[Product],
        index: usize,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        let line = self.lines.get(index).ok_or(CartError::InvalidLine(index))?;
        let product = catalog
            .iter()
            .find(|product| product.id == line.product.id)
            .unwrap_or(&line.product)
            .clone();
        let available = i64::from(product.available);
        let mut requested = i64::from(line.quantity) + delta;

        if requested > available {
            if delta > 0 {
                return Err(CartError::StockExceeded { name: product.name, available: product.available });
            }
            requested = available;
        }

        if requested <= 0 {
            return Ok(QuantityChange::Removed(self.lines.remove(index)));
        }

        let line = &mut self.lines[index];
        line.quantity = requested as u32;
        line.product = product;
        Ok(QuantityChange::Updated(line.clone()))
    }

    /// Brings every line in line with a freshly fetched catalog: the product
    /// snapshot is replaced, quantities are capped at the new stock, and lines
    /// whose product is gone or sold out are dropped. Returns the dropped lines.
    pub fn reconcile(&mut self, catalog: &[Product]) -> Vec<CartLine> {
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.lines.len());

        for mut line in self.lines.drain(..) {
            match catalog.iter().find(|product| product.id == line.product.id) {
                Some(product) if product.in_stock() => {
                    line.quantity = line.quantity.min(product.available);
                    line.product = product.clone();
                    kept.push(line);
                }
                _ => dropped.push(line),
            }
        }

        self.lines = kept;
        dropped
    }

    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::InvalidLine(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Builds the write-once order for checkout.
    pub fn to_order(&self, identity: &Identity) -> Result<Order, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let lines = self
            .lines
            .iter()
            .map(|line| OrderLine {
                product_id: line.product.id.clone(),
                quantity: line.quantity,
                unit_price: line.product.price,
            })
            .collect();
        Ok(Order { customer: identity.reference().to_string(), lines, total: self.total() })
    }

    pub fn snapshot(&self, catalog: &[Product]) -> CartSnapshot {
        CartSnapshot {
            catalog: catalog.to_vec(),
            lines: self.lines.clone(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("P1", "Game A", Decimal::TEN, 2),
            Product::new("P2", "Game B", Decimal::new(2550, 2), 0),
            Product::new("P3", "Game C", Decimal::new(500, 2), 5),
        ]
    }

    #[test]
    fn test_third_add_beyond_stock_is_rejected() {
        let catalog = catalog();
        let mut cart = Cart::default();

        cart.add(&catalog, "P1").unwrap();
        cart.add(&catalog, "P1").unwrap();
        let result = cart.add(&catalog, "P1");

        assert_eq!(result, Err(CartError::StockExceeded { name: "Game A".into(), available: 2 }));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_out_of_stock_product_never_enters_cart() {
        let catalog = catalog();
        let mut cart = Cart::default();

        assert_eq!(cart.add(&catalog, "P2"), Err(CartError::OutOfStock("Game B".into())));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let mut cart = Cart::default();
        assert_eq!(cart.add(&catalog(), "P9"), Err(CartError::ProductNotFound("P9".into())));
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let catalog = catalog();
        let mut cart = Cart::default();
        cart.add(&catalog, "P1").unwrap();
        cart.add(&catalog, "P1").unwrap();

        let change = cart.change_quantity(&catalog, 0, -2).unwrap();

        assert!(matches!(change, QuantityChange::Removed(line) if line.quantity == 2));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_past_stock_leaves_line_untouched() {
        let catalog = catalog();
        let mut cart = Cart::default();
        cart.add(&catalog, "P3").unwrap();

        assert!(cart.change_quantity(&catalog, 0, 5).is_err());
        assert_eq!(cart.lines()[0].quantity, 1);

        let change = cart.change_quantity(&catalog, 0, 4).unwrap();
        assert!(matches!(change, QuantityChange::Updated(line) if line.quantity == 5));
    }

    #[test]
    fn test_quantity_checks_use_latest_catalog_stock() {
        let mut catalog = catalog();
        let mut cart = Cart::default();
        cart.add(&catalog, "P3").unwrap();

        catalog[2].available = 1;
        assert!(matches!(
            cart.change_quantity(&catalog, 0, 1),
            Err(CartError::StockExceeded { available: 1, .. })
        ));
    }

    #[test]
    fn test_decrement_after_stock_drop_lands_within_stock() {
        let mut catalog = catalog();
        let mut cart = Cart::default();
        for _ in 0..3 {
            cart.add(&catalog, "P3").unwrap();
        }

        catalog[2].available = 1;
        let change = cart.change_quantity(&catalog, 0, -1).unwrap();

        assert!(matches!(change, QuantityChange::Updated(line) if line.quantity == 1));
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[0].product.available, 1);

        catalog[2].available = 0;
        let change = cart.change_quantity(&catalog, 0, -1).unwrap();
        assert!(matches!(change, QuantityChange::Removed(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_reconcile_caps_and_drops_lines() {
        let mut catalog = catalog();
        let mut cart = Cart::default();
        cart.add(&catalog, "P1").unwrap();
        for _ in 0..4 {
            cart.add(&catalog, "P3").unwrap();
        }

        catalog[0].available = 0;
        catalog[2].available = 2;
        catalog[2].price = Decimal::from(7);
        let dropped = cart.reconcile(&catalog);

        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].product.id, "P1");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Decimal::from(14));

        let dropped = cart.reconcile(&catalog[..2]);
        assert_eq!(dropped[0].product.id, "P3");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_invalid_line_index() {
        let mut cart = Cart::default();
        assert_eq!(cart.remove(0), Err(CartError::InvalidLine(0)));
        assert_eq!(cart.change_quantity(&catalog(), 3, 1), Err(CartError::InvalidLine(3)));
    }

    #[test]
    fn test_totals_and_order() {
        let catalog = catalog();
        let mut cart = Cart::default();
        cart.add(&catalog, "P1").unwrap();
        cart.add(&catalog, "P3").unwrap();
        cart.change_quantity(&catalog, 1, 2).unwrap();

        assert_eq!(cart.total(), Decimal::from(25));
        assert_eq!(cart.item_count(), 4);

        let order = cart.to_order(&Identity::new("ana", Role::Customer)).unwrap();
        assert_eq!(order.total, Decimal::from(25));
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[1].product_id, "P3");
        assert_eq!(order.lines[1].quantity, 3);
        assert_eq!(order.lines.iter().map(OrderLine::subtotal).sum::<Decimal>(), order.total);
    }

    #[test]
    fn test_empty_cart_builds_no_order() {
        let cart = Cart::default();
        assert_eq!(cart.to_order(&Identity::new("ana", Role::Customer)), Err(CartError::EmptyCart));
    }
}
