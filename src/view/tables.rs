use std::ops::Range;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use super::format::{format_price, stock_badge};
use crate::admin_actor::AdminSnapshot;
use crate::cart_actor::CartSnapshot;
use crate::domain::{Employee, Product, ProductForm, Sale, UserAccount};

pub const EMPTY_CATALOG: &str = "No products available right now.";
pub const EMPTY_CART: &str = "Your cart is empty.";
pub const EMPTY_INVENTORY: &str = "No products found.";
pub const EMPTY_SALES: &str = "No sales registered.";
pub const EMPTY_USERS: &str = "No users registered.";
pub const EMPTY_EMPLOYEES: &str = "No employees registered.";

fn finish(builder: Builder, right_aligned: Option<Range<usize>>) -> String {
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    if let Some(columns) = right_aligned {
        table.modify(Columns::new(columns), Alignment::right());
    }
    table.to_string()
}

fn optional(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

/// Customer view of the catalog; `add` takes the id column.
pub fn render_catalog(products: &[Product]) -> String {
    if products.is_empty() {
        return EMPTY_CATALOG.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Id", "Name", "Platform", "Genre", "Price", "Stock"]);
    for (i, product) in products.iter().enumerate() {
        let stock = if product.in_stock() { product.available.to_string() } else { "Out of stock".to_string() };
        builder.push_record([
            (i + 1).to_string(),
            product.id.clone(),
            product.name.clone(),
            optional(product.platform.as_deref()).to_string(),
            optional(product.genre.as_deref()).to_string(),
            format_price(product.price),
            stock,
        ]);
    }
    finish(builder, Some(5..7))
}

pub fn render_cart(snapshot: &CartSnapshot) -> String {
    if snapshot.lines.is_empty() {
        return EMPTY_CART.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Product", "Unit price", "Qty", "Subtotal"]);
    for (i, line) in snapshot.lines.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            line.product.name.clone(),
            format_price(line.product.price),
            line.quantity.to_string(),
            format_price(line.subtotal()),
        ]);
    }
    let table = finish(builder, Some(2..5));
    let noun = if snapshot.item_count == 1 { "item" } else { "items" };
    format!("{table}\nTotal: {} ({} {noun})", format_price(snapshot.total), snapshot.item_count)
}

/// Employee view of the product list, with stock badges.
pub fn render_inventory(products: &[Product], editing: Option<&str>) -> String {
    if products.is_empty() {
        return EMPTY_INVENTORY.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["", "Id", "Name", "Platform", "Genre", "Price", "Stock", "Level"]);
    for product in products {
        let marker = if editing == Some(product.id.as_str()) { "*" } else { "" };
        builder.push_record([
            marker.to_string(),
            product.id.clone(),
            product.name.clone(),
            optional(product.platform.as_deref()).to_string(),
            optional(product.genre.as_deref()).to_string(),
            format_price(product.price),
            product.available.to_string(),
            stock_badge(product.stock_level()).to_string(),
        ]);
    }
    finish(builder, Some(5..7))
}

pub fn render_admin(snapshot: &AdminSnapshot) -> String {
    render_inventory(&snapshot.products, snapshot.editing.as_deref())
}

pub fn render_form(form: &ProductForm) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, value) in [
        ("name", &form.name),
        ("platform", &form.platform),
        ("genre", &form.genre),
        ("price", &form.price),
        ("stock", &form.stock),
        ("description", &form.description),
    ] {
        builder.push_record([field, value.as_str()]);
    }
    finish(builder, None)
}

pub fn render_sales(sales: &[Sale]) -> String {
    if sales.is_empty() {
        return EMPTY_SALES.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Product", "Qty", "Customer", "Total", "Date"]);
    for sale in sales {
        builder.push_record([
            sale.product.as_ref().map_or("-", |p| p.name.as_str()).to_string(),
            sale.quantity.to_string(),
            sale.customer.clone(),
            format_price(sale.total),
            optional(sale.date.as_deref()).to_string(),
        ]);
    }
    finish(builder, Some(1..2))
}

pub fn render_users(users: &[UserAccount]) -> String {
    if users.is_empty() {
        return EMPTY_USERS.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Name", "Email", "Role"]);
    for user in users {
        builder.push_record([user.id.as_str(), user.name.as_str(), user.email.as_str(), user.role.as_str()]);
    }
    finish(builder, None)
}

pub fn render_employees(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return EMPTY_EMPLOYEES.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Name", "Position", "Salary"]);
    for employee in employees {
        builder.push_record([
            employee.id.clone(),
            employee.name.clone(),
            employee.position.clone(),
            format_price(employee.salary),
        ]);
    }
    finish(builder, Some(3..4))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::cart_actor::Cart;

    #[test]
    fn test_empty_states() {
        assert_eq!(render_catalog(&[]), EMPTY_CATALOG);
        assert_eq!(render_cart(&CartSnapshot::default()), EMPTY_CART);
        assert_eq!(render_inventory(&[], None), EMPTY_INVENTORY);
        assert_eq!(render_sales(&[]), EMPTY_SALES);
        assert_eq!(render_users(&[]), EMPTY_USERS);
        assert_eq!(render_employees(&[]), EMPTY_EMPLOYEES);
    }

    #[test]
    fn test_catalog_marks_out_of_stock() {
        let products = vec![
            Product::new("P1", "Game A", Decimal::new(125050, 2), 3),
            Product::new("P2", "Game B", Decimal::TEN, 0),
        ];
        let table = render_catalog(&products);

        assert!(table.contains("$1,250.50"));
        assert!(table.contains("Out of stock"));
    }

    #[test]
    fn test_cart_shows_total_and_count() {
        let catalog = vec![Product::new("P1", "Game A", Decimal::TEN, 5)];
        let mut cart = Cart::default();
        cart.add(&catalog, "P1").unwrap();
        cart.add(&catalog, "P1").unwrap();

        let text = render_cart(&cart.snapshot(&catalog));
        assert!(text.ends_with("Total: $20.00 (2 items)"));
    }

    #[test]
    fn test_inventory_badges_and_edit_marker() {
        let products = vec![
            Product::new("P1", "Game A", Decimal::TEN, 0),
            Product::new("P2", "Game B", Decimal::TEN, 11),
        ];
        let table = render_inventory(&products, Some("P2"));

        assert!(table.contains("low"));
        assert!(table.contains("high"));
        assert!(table.contains('*'));
    }
}
