//! Locally held order with an explicit "pending reconciliation" state
//!
//! A line marked delivered before the server confirms it is kept as an
//! optimistic copy next to the last authoritative one. The next fetch
//! reconciles it; a failed push rolls it back.

use crate::models::{Order, OrderStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum OrderEntry {
    /// Matches the last server copy
    Synced(Order),
    /// Changed locally, not yet confirmed
    PendingReconciliation { optimistic: Order, previous: Order },
}

impl OrderEntry {
    /// The copy to display
    pub fn current(&self) -> &Order {
        match self {
            Self::Synced(order) => order,
            Self::PendingReconciliation { optimistic, .. } => optimistic,
        }
    }

    pub fn id(&self) -> &str {
        &self.current().id
    }

    pub fn status(&self) -> OrderStatus {
        self.current().status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::PendingReconciliation { .. })
    }

    /// Record a local change; an already pending entry keeps its original
    /// `previous` so a rollback goes back to the server copy.
    pub fn apply_optimistic(self, optimistic: Order) -> Self {
        let previous = match self {
            Self::Synced(order) => order,
            Self::PendingReconciliation { previous, .. } => previous,
        };
        Self::PendingReconciliation {
            optimistic,
            previous,
        }
    }

    /// Replace with the server copy
    pub fn reconcile(self, authoritative: Order) -> Self {
        if let Self::PendingReconciliation { optimistic, .. } = &self
            && optimistic.status != authoritative.status
        {
            tracing::info!(
                order_id = %authoritative.id,
                local = %optimistic.status,
                server = %authoritative.status,
                "Optimistic order state differs from server"
            );
        }
        Self::Synced(authoritative)
    }

    /// Drop the local change
    pub fn rollback(self) -> Self {
        match self {
            Self::Synced(order) => Self::Synced(order),
            Self::PendingReconciliation { previous, .. } => Self::Synced(previous),
        }
    }
}

impl From<Order> for OrderEntry {
    fn from(order: Order) -> Self {
        Self::Synced(order)
    }
}
