//! Booking Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking status (lower case on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    Booked,
    Seated,
    Completed,
    Cancelled,
    Unknown,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Seated => "seated",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "booked" => Self::Booked,
            "seated" => Self::Seated,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reserved time window for a party at a store. Times are persisted as UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone_number: String,
    #[serde(default)]
    pub guests_count: u32,
    #[serde(with = "crate::util::utc_millis")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::util::utc_millis")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
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
}
