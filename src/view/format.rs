use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::StockLevel;

/// `$` amount with thousands separators and two decimals, e.g. `$1,234.50`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

pub fn stock_badge(level: StockLevel) -> &'static str {
    match level {
        StockLevel::Low => "low",
        StockLevel::Medium => "medium",
        StockLevel::High => "high",
    }
}
