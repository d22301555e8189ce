//! Discount applied when an order is handed over

use rust_decimal::Decimal;
use serde::Serialize;

use super::money::{saturating_add, saturating_mul, to_decimal, to_f64};
use crate::models::{Order, OrderStatus};
use crate::validation::ValidationErrors;

/// Result of the delivery dialog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub final_total: f64,
    pub discount: f64,
}

/// `discount = percent ? total × value / 100 : value`, `final = max(total − discount, 0)`.
///
/// The recorded discount is what was entered, even when it exceeds the
/// total; only the final total is clamped. Negative input counts as zero.
pub fn apply_delivery(order: &Order, value: f64, is_percent: bool) -> Delivery {
    compute(to_decimal(order.total_cost), to_decimal(value), is_percent)
}

fn compute(total: Decimal, value: Decimal, is_percent: bool) -> Delivery {
    let value = value.max(Decimal::ZERO);
    let discount = if is_percent {
        saturating_mul(total, value / Decimal::ONE_HUNDRED)
    } else {
        value
    };
    let final_total = saturating_add(total, -discount).max(Decimal::ZERO);
    Delivery {
        final_total: to_f64(final_total),
        discount: to_f64(discount),
    }
}

/// Payload for the "to delivered" endpoint
pub fn delivered_order(order: &Order, delivery: Delivery) -> Order {
    Order {
        total_cost: delivery.final_total,
        total_discount: delivery.discount,
        status: OrderStatus::Delivered,
        ..order.clone()
    }
}

/// Amount and percentage fields of the delivery dialog, kept in sync
/// against the order total.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountInput {
    total: Decimal,
    amount: Decimal,
    percent: Decimal,
    is_percent: bool,
}

impl DiscountInput {
    pub fn new(order: &Order) -> Self {
        Self {
            total: to_decimal(order.total_cost),
            amount: Decimal::ZERO,
            percent: Decimal::ZERO,
            is_percent: false,
        }
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.amount = entered(amount);
        self.percent = if self.total.is_zero() {
            Decimal::ZERO
        } else {
            self.amount
                .checked_div(self.total)
                .map_or(Decimal::MAX, |ratio| saturating_mul(ratio, Decimal::ONE_HUNDRED))
        };
        self.is_percent = false;
    }

    pub fn set_percent(&mut self, percent: f64) {
        self.percent = entered(percent);
        self.amount = saturating_mul(self.total, self.percent / Decimal::ONE_HUNDRED);
        self.is_percent = true;
    }

    pub fn amount(&self) -> f64 {
        to_f64(self.amount)
    }

    /// Percentage, rounded to 2 decimal places
    pub fn percent(&self) -> f64 {
        to_f64(self.percent)
    }

    pub fn is_percent(&self) -> bool {
        self.is_percent
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.amount < Decimal::ZERO {
            errors.add("discountAmount", "Discount must be a non-negative number");
        }
        if self.percent < Decimal::ZERO || self.percent > Decimal::ONE_HUNDRED {
            errors.add("discountPercentage", "Percentage must be between 0 and 100");
        }
        errors.into_result()
    }

    /// Validated delivery for the field that was edited last
    pub fn delivery(&self) -> Result<Delivery, ValidationErrors> {
        self.validate()?;
        let value = if self.is_percent {
            self.percent
        } else {
            self.amount
        };
        Ok(compute(self.total, value, self.is_percent))
    }
}

/// Non-finite input is kept as an invalid (negative) value
fn entered(value: f64) -> Decimal {
    if value.is_finite() {
        to_decimal(value)
    } else {
        Decimal::NEGATIVE_ONE
    }
}
