//! Booking status machine: booked → seated → completed, booked/seated → cancelled

use serde::Serialize;

use crate::models::{Booking, BookingStatus};

/// Booking endpoint an action posts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingCommand {
    Seat,
    Complete,
    Cancel,
}

impl BookingCommand {
    /// Path segment of `api/booking/{id}/{segment}`
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Seat => "seat",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }

    pub fn target(&self) -> BookingStatus {
        match self {
            Self::Seat => BookingStatus::Seated,
            Self::Complete => BookingStatus::Completed,
            Self::Cancel => BookingStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAction {
    pub label: &'static str,
    pub command: BookingCommand,
}

pub fn next_booking_action(booking: &Booking) -> Option<BookingAction> {
    match booking.status {
        BookingStatus::Booked => Some(BookingAction {
            label: "Mark as Seated",
            command: BookingCommand::Seat,
        }),
        BookingStatus::Seated => Some(BookingAction {
            label: "Mark as Completed",
            command: BookingCommand::Complete,
        }),
        _ => None,
    }
}

pub fn can_cancel_booking(booking: &Booking) -> bool {
    matches!(booking.status, BookingStatus::Booked | BookingStatus::Seated)
}

/// Whether `command` is legal from the booking's current status
pub fn is_allowed(booking: &Booking, command: BookingCommand) -> bool {
    match command {
        BookingCommand::Cancel => can_cancel_booking(booking),
        other => next_booking_action(booking).is_some_and(|a| a.command == other),
    }
}
