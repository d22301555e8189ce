//! Order lifecycle
//!
//! - `lifecycle`: which transition is legal from which state
//! - `delivery`: discount applied at hand-over
//! - `money`: decimal totals
//! - `entry`: optimistic local copy awaiting reconciliation
//! - `form`: order form validation
//! - `filter`: order list filter

pub mod delivery;
pub mod entry;
pub mod filter;
pub mod form;
pub mod lifecycle;
pub mod money;

// Re-exports
pub use delivery::{Delivery, DiscountInput, apply_delivery, delivered_order};
pub use entry::OrderEntry;
pub use filter::{OrderFilter, store_options};
pub use form::{OrderForm, OrderFormLine};
pub use lifecycle::{
    LineAction, OrderAction, can_cancel_line, can_cancel_order, can_edit_order,
    mark_line_delivered, next_line_action, next_order_action, with_status,
};
pub use money::order_total;
