//! Availability slots returned by the booking availability endpoint

use serde::{Deserialize, Serialize};

/// Slot length used when the backend omits `minutes`
pub const DEFAULT_SLOT_MINUTES: u32 = 60;

/// A candidate bookable window for a date and party size. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    /// Slot start as sent by the backend (RFC 3339 or SQL-style)
    pub start: String,
    #[serde(default, alias = "durationMinutes")]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub available_seats: u32,
    #[serde(default)]
    pub is_available: bool,
}

impl AvailabilitySlot {
    pub fn duration_minutes(&self) -> u32 {
        match self.minutes {
            Some(m) if m > 0 => m,
            _ => DEFAULT_SLOT_MINUTES,
        }
    }
}

/// Query for the availability endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    /// `YYYY-MM-DD`
    pub date: String,
    pub party_size: u32,
}
