//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for serialization.

use rust_decimal::prelude::*;

use crate::models::OrderLine;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal; non-finite input counts as zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Product that saturates instead of overflowing
pub fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or_else(|| {
        tracing::error!(%a, %b, "Monetary multiplication overflowed, saturating");
        if a.is_sign_negative() != b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sum that saturates instead of overflowing
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::error!(%a, %b, "Monetary addition overflowed, saturating");
        if a.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// price × quantity of one line
pub fn line_total(line: &OrderLine) -> Decimal {
    saturating_mul(to_decimal(line.item_price), Decimal::from(line.quantity.max(0)))
}

/// Σ price × quantity before any discount
pub fn order_total(lines: &[OrderLine]) -> f64 {
    to_f64(lines.iter().map(line_total).fold(Decimal::ZERO, saturating_add))
}
