//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// Wire values are upper case. Parsing is case-insensitive; anything outside
/// the six known states becomes [`OrderStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Created,
    Confirmed,
    Processing,
    Ready,
    Delivered,
    Cancelled,
    Unknown,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// DELIVERED and CANCELLED accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Self::Created,
            "CONFIRMED" => Self::Confirmed,
            "PROCESSING" => Self::Processing,
            "READY" => Self::Ready,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line status (a subset of the order states)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LineStatus {
    #[default]
    Created,
    Processing,
    Ready,
    Delivered,
    Cancelled,
    Unknown,
}

impl LineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Processing => "PROCESSING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Self::Created,
            "PROCESSING" => Self::Processing,
            "READY" => Self::Ready,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for LineStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<LineStatus> for String {
    fn from(status: LineStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single item/quantity entry of an order (`OrderDetails` on the wire)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub order_number: i64,
    #[serde(default)]
    pub status: LineStatus,
    /// Item name
    #[serde(default)]
    pub item: String,
    /// Unit price
    #[serde(default)]
    pub item_price: f64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
}

/// Customer order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub order_number: i64,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone_number: String,
    /// Σ price × quantity before delivery; discounted amount after
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_discount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, rename = "orderDetails")]
    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn line(&self, line_id: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }
}

/// Payload for the order-line status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStatusUpdate {
    #[serde(flatten)]
    pub line: OrderLine,
    pub org_name: String,
    pub store_name: String,
}
