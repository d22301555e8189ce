//! Availability slots: query validation, filtering, and quick-booking drafts

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use super::form::BookingForm;
use super::time::{TimeError, is_selectable_future, parse_slot_start, utc_to_local_input};
use crate::models::{AvailabilityQuery, AvailabilitySlot, BookingStatus};
use crate::validation::ValidationErrors;

/// Slots offered to staff after a query
pub const DEFAULT_MAX_SLOTS: usize = 5;

/// Party size preselected in the availability dialog and calendar drafts
pub const DEFAULT_PARTY_SIZE: u32 = 2;

/// Keep only available slots, in backend order, at most `max_results`
pub fn filter_available_slots(slots: &[AvailabilitySlot], max_results: usize) -> Vec<AvailabilitySlot> {
    slots
        .iter()
        .filter(|s| s.is_available)
        .take(max_results)
        .cloned()
        .collect()
}

impl AvailabilityQuery {
    pub fn new(date: impl Into<String>, party_size: u32) -> Self {
        Self {
            date: date.into(),
            party_size,
        }
    }

    pub fn validate(&self) -> Result<NaiveDate, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let date = if self.date.trim().is_empty() {
            errors.add("date", "Date is required");
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.add("date", "Enter a date as YYYY-MM-DD");
                    None
                }
            }
        };
        if self.party_size < 1 {
            errors.add("partySize", "Number of guests is required");
        }
        errors.into_result()?;
        date.ok_or_else(ValidationErrors::new)
    }
}

/// Contact details carried from the availability dialog into the draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotContact {
    pub customer_name: String,
    pub customer_phone_number: String,
    pub party_size: u32,
    pub notes: String,
}

/// Picked slot resolved to UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

pub fn slot_window(slot: &AvailabilitySlot, tz: Tz) -> Result<SlotWindow, TimeError> {
    let start = parse_slot_start(&slot.start, tz)?;
    let end = start + Duration::minutes(i64::from(slot.duration_minutes()));
    Ok(SlotWindow { start, end })
}

/// Prefilled booking form for a picked slot. Nothing is submitted here;
/// the caller creates the booking once the form is confirmed.
pub fn slot_booking_draft(
    slot: &AvailabilitySlot,
    contact: &SlotContact,
    tz: Tz,
) -> Result<BookingForm, TimeError> {
    let window = slot_window(slot, tz)?;
    Ok(BookingForm {
        customer_name: contact.customer_name.clone(),
        customer_phone_number: contact.customer_phone_number.clone(),
        guests_count: contact.party_size,
        start_time: utc_to_local_input(window.start, tz),
        end_time: utc_to_local_input(window.end, tz),
        status: BookingStatus::Booked,
        notes: contact.notes.clone(),
    })
}

/// Prefilled form for a range selected on the calendar, `None` when it
/// starts in the past.
pub fn calendar_selection_draft(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
    tz: Tz,
) -> Option<BookingForm> {
    if !is_selectable_future(start, now) {
        tracing::warn!(%start, "Selected range starts in the past");
        return None;
    }
    Some(BookingForm {
        guests_count: DEFAULT_PARTY_SIZE,
        start_time: utc_to_local_input(start, tz),
        end_time: utc_to_local_input(end, tz),
        status: BookingStatus::Booked,
        ..Default::default()
    })
}
