//! Bookings: store-zone time resolution, availability slots, status machine,
//! and form validation

pub mod availability;
pub mod form;
pub mod lifecycle;
pub mod time;
pub mod zone;

// Re-exports
pub use availability::{
    DEFAULT_MAX_SLOTS, DEFAULT_PARTY_SIZE, SlotContact, SlotWindow, calendar_selection_draft,
    filter_available_slots, slot_booking_draft, slot_window,
};
pub use form::{BookingForm, ResolvedTimes};
pub use lifecycle::{BookingAction, BookingCommand, can_cancel_booking, is_allowed, next_booking_action};
pub use time::{
    TimeError, is_selectable_future, local_to_utc, parse_instant, parse_slot_start,
    to_local_input_string, to_utc_iso, utc_to_local_input,
};
pub use zone::{canonical_zone_name, resolve_zone};
