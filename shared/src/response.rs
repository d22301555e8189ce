//! API Response types
//!
//! The backend answers either with the entity itself or with an envelope:
//! ```json
//! {
//!     "data": { ... },
//!     "message": "optional text"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{AvailabilitySlot, MenuItem, Order, User};

/// Envelope wrapping a response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// A body that is either enveloped or the bare entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaybeEnveloped<T> {
    Wrapped(ApiResponse<T>),
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped(resp) => resp.data,
            Self::Bare(value) => value,
        }
    }
}

/// `data` of the order list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersPayload {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// `data` of the availability query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotsPayload {
    #[serde(default)]
    pub slots: Vec<AvailabilitySlot>,
}

/// `data` of the menu item list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemsPayload {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// `data` of the user list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersPayload {
    #[serde(default)]
    pub users: Vec<User>,
}
