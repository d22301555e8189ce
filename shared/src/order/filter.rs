//! Order list filter: free text over customer name and phone, plus store
//! and status facets. An empty facet matches everything.

use crate::models::{Order, OrderStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    /// Matched case-insensitively against customer name or phone
    pub text: String,
    pub stores: Vec<String>,
    pub statuses: Vec<OrderStatus>,
}

impl OrderFilter {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.stores.is_empty() && self.statuses.is_empty()
    }

    pub fn matches(&self, order: &Order) -> bool {
        let text = self.text.trim().to_lowercase();
        let text_ok = text.is_empty()
            || order.customer_name.to_lowercase().contains(&text)
            || order.customer_phone_number.to_lowercase().contains(&text);
        text_ok
            && (self.stores.is_empty() || self.stores.iter().any(|s| *s == order.store_name))
            && (self.statuses.is_empty() || self.statuses.contains(&order.status))
    }
}

/// Distinct store names for the store facet, in first-seen order
pub fn store_options<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Vec<String> {
    let mut stores: Vec<String> = Vec::new();
    for order in orders {
        if !order.store_name.is_empty() && !stores.contains(&order.store_name) {
            stores.push(order.store_name.clone());
        }
    }
    stores
}
