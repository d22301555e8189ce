//! Order form input and validation

use serde::{Deserialize, Serialize};

use super::money::{MAX_PRICE, MAX_QUANTITY, order_total};
use crate::models::{LineStatus, MenuItem, Order, OrderLine, OrderStatus, SessionContext};
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MIN_PHONE_LEN, ValidationErrors, check_optional_text,
    check_required_text,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormLine {
    /// Id of the order line being edited; empty for a new line
    #[serde(default)]
    pub id: String,
    pub item_name: String,
    pub item_price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
    /// Only customizable items keep their notes
    #[serde(default)]
    pub customizable: bool,
}

impl OrderFormLine {
    /// Prefill a line from the picked menu item
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            id: String::new(),
            item_name: item.item_name.clone(),
            item_price: item.item_price,
            quantity: 1,
            notes: String::new(),
            customizable: item.customizable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub customer_name: String,
    pub customer_phone_number: String,
    #[serde(default)]
    pub order_notes: String,
    #[serde(rename = "orderDetails")]
    pub lines: Vec<OrderFormLine>,
}

impl OrderForm {
    /// Prefill from an existing order; a line with notes counts as customizable
    pub fn from_order(order: &Order) -> Self {
        Self {
            customer_name: order.customer_name.clone(),
            customer_phone_number: order.customer_phone_number.clone(),
            order_notes: order.notes.clone(),
            lines: order
                .lines
                .iter()
                .map(|l| OrderFormLine {
                    id: l.id.clone(),
                    item_name: l.item.clone(),
                    item_price: l.item_price,
                    quantity: l.quantity,
                    notes: l.notes.clone(),
                    customizable: !l.notes.is_empty(),
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_text(
            &mut errors,
            "customerName",
            &self.customer_name,
            MAX_NAME_LEN,
            "Required",
        );
        if self.customer_phone_number.trim().chars().count() < MIN_PHONE_LEN {
            errors.add("customerPhoneNumber", "Enter valid number");
        }
        check_optional_text(&mut errors, "orderNotes", Some(&self.order_notes), MAX_NOTE_LEN);
        if self.lines.is_empty() {
            errors.add("orderDetails", "Add at least one item");
        }
        for (i, line) in self.lines.iter().enumerate() {
            if line.item_name.trim().is_empty() {
                errors.add(format!("orderDetails.{i}.itemName"), "Required");
            }
            if !line.item_price.is_finite() || line.item_price < 0.0 {
                errors.add(
                    format!("orderDetails.{i}.itemPrice"),
                    "Price must be a positive number",
                );
            } else if line.item_price > MAX_PRICE {
                errors.add(
                    format!("orderDetails.{i}.itemPrice"),
                    format!("Price cannot exceed {MAX_PRICE}"),
                );
            }
            if line.quantity < 1 {
                errors.add(format!("orderDetails.{i}.quantity"), "Quantity must be at least 1");
            } else if line.quantity > MAX_QUANTITY {
                errors.add(
                    format!("orderDetails.{i}.quantity"),
                    format!("Quantity cannot exceed {MAX_QUANTITY}"),
                );
            }
        }
        errors.into_result()
    }

    fn new_line(line: &OrderFormLine, ctx: &SessionContext) -> OrderLine {
        OrderLine {
            item: line.item_name.trim().to_string(),
            item_price: line.item_price,
            quantity: line.quantity,
            notes: if line.customizable {
                line.notes.clone()
            } else {
                String::new()
            },
            status: LineStatus::Created,
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            ..Default::default()
        }
    }

    /// New CREATED order stamped with the caller's identity
    pub fn into_new_order(self, ctx: &SessionContext) -> Result<Order, ValidationErrors> {
        self.validate()?;
        let lines: Vec<OrderLine> = self.lines.iter().map(|l| Self::new_line(l, ctx)).collect();
        Ok(Order {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone_number: self.customer_phone_number.trim().to_string(),
            total_cost: order_total(&lines),
            total_discount: 0.0,
            status: OrderStatus::Created,
            notes: self.order_notes,
            org_name: ctx.org_name.clone(),
            store_name: ctx.current_store.clone(),
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            lines,
            ..Default::default()
        })
    }

    /// Edited copy of `existing`. Order status and identifiers are kept, as
    /// are the id and status of every line that is still on the order; lines
    /// without a known id are added as CREATED.
    pub fn apply_to(self, existing: &Order, ctx: &SessionContext) -> Result<Order, ValidationErrors> {
        self.validate()?;
        let lines: Vec<OrderLine> = self
            .lines
            .iter()
            .map(|l| {
                let fresh = Self::new_line(l, ctx);
                match existing.lines.iter().find(|e| !l.id.is_empty() && e.id == l.id) {
                    Some(kept) => OrderLine {
                        item: fresh.item,
                        item_price: fresh.item_price,
                        quantity: fresh.quantity,
                        notes: fresh.notes,
                        updated_by: fresh.updated_by,
                        ..kept.clone()
                    },
                    None => OrderLine {
                        order_id: existing.id.clone(),
                        order_number: existing.order_number,
                        ..fresh
                    },
                }
            })
            .collect();
        Ok(Order {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone_number: self.customer_phone_number.trim().to_string(),
            total_cost: order_total(&lines),
            notes: self.order_notes,
            updated_by: ctx.user_id.clone(),
            lines,
            ..existing.clone()
        })
    }
}
