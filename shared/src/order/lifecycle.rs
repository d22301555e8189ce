//! Order and order-line state machine
//!
//! ```text
//! CREATED -> CONFIRMED -> PROCESSING -> READY -> DELIVERED
//!    |            |
//!    +--------> CANCELLED
//! ```
//!
//! Every table and dialog asks these functions which action is legal; a
//! `None` result is the guard against acting on a finished order.

use serde::Serialize;

use crate::models::{LineStatus, Order, OrderLine, OrderStatus};

/// Next legal step for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAction {
    pub label: &'static str,
    pub target: OrderStatus,
    /// The discount dialog must be completed before committing
    pub requires_delivery_dialog: bool,
}

/// Next legal step for an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAction {
    pub label: &'static str,
    pub target: LineStatus,
}

pub fn next_order_action(order: &Order) -> Option<OrderAction> {
    let (label, target) = match order.status {
        OrderStatus::Created => ("Confirm", OrderStatus::Confirmed),
        OrderStatus::Confirmed => ("Process", OrderStatus::Processing),
        OrderStatus::Processing => ("Ready", OrderStatus::Ready),
        OrderStatus::Ready => ("Deliver", OrderStatus::Delivered),
        OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Unknown => return None,
    };
    Some(OrderAction {
        label,
        target,
        requires_delivery_dialog: target == OrderStatus::Delivered,
    })
}

/// Lines only move while their order is CONFIRMED
pub fn next_line_action(line: &OrderLine, parent_status: OrderStatus) -> Option<LineAction> {
    if parent_status != OrderStatus::Confirmed {
        return None;
    }
    let (label, target) = match line.status {
        LineStatus::Created => ("Process", LineStatus::Processing),
        LineStatus::Processing => ("Ready", LineStatus::Ready),
        LineStatus::Ready => ("Deliver", LineStatus::Delivered),
        _ => return None,
    };
    Some(LineAction { label, target })
}

pub fn can_cancel_line(line: &OrderLine) -> bool {
    line.status == LineStatus::Created
}

/// Orders can be cancelled until work on them starts
pub fn can_cancel_order(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Created | OrderStatus::Confirmed)
}

/// The order form is only offered before work on the order starts
pub fn can_edit_order(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Created | OrderStatus::Confirmed)
}

/// Mark one line delivered; the order follows once every line is delivered.
///
/// Returns the order unchanged when `line_id` is not one of its lines.
pub fn mark_line_delivered(order: &Order, line_id: &str) -> Order {
    let mut next = order.clone();
    let Some(line) = next.lines.iter_mut().find(|l| l.id == line_id) else {
        tracing::warn!(order_id = %order.id, line_id, "Line not found on order");
        return next;
    };
    line.status = LineStatus::Delivered;

    if next.lines.iter().all(|l| l.status == LineStatus::Delivered) {
        tracing::info!(order_id = %order.id, "All lines delivered, order delivered");
        next.status = OrderStatus::Delivered;
    }
    next
}

/// Apply an action's target to a copy of the order
pub fn with_status(order: &Order, status: OrderStatus) -> Order {
    Order {
        status,
        ..order.clone()
    }
}
