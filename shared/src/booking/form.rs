//! Booking form validation
//!
//! Times in the form are store-local `YYYY-MM-DDTHH:MM` strings. They are
//! compared after zone resolution, never as raw strings.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::time::{TimeError, local_to_utc, parse_local_input, utc_to_local_input};
use crate::models::{Booking, BookingStatus, SessionContext};
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, ValidationErrors, check_optional_text, check_required_text,
    is_valid_phone,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub customer_name: String,
    pub customer_phone_number: String,
    pub guests_count: u32,
    /// Store-local start, `YYYY-MM-DDTHH:MM`
    pub start_time: String,
    /// Store-local end, `YYYY-MM-DDTHH:MM`
    pub end_time: String,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: String,
}

/// Validated form with both ends resolved to UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimes {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn resolve_field(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    tz: Tz,
    required_message: &str,
) -> Option<DateTime<Utc>> {
    let resolved = parse_local_input(value).and_then(|naive| local_to_utc(naive, tz));
    match resolved {
        Ok(instant) => Some(instant),
        Err(TimeError::Empty) => {
            errors.add(field, required_message);
            None
        }
        Err(err) => {
            errors.add(field, err.to_string());
            None
        }
    }
}

impl BookingForm {
    /// Prefill from a persisted booking
    pub fn from_booking(booking: &Booking, tz: Tz) -> Self {
        Self {
            customer_name: booking.customer_name.clone(),
            customer_phone_number: booking.customer_phone_number.clone(),
            guests_count: booking.guests_count,
            start_time: utc_to_local_input(booking.start_time, tz),
            end_time: utc_to_local_input(booking.end_time, tz),
            status: booking.status,
            notes: booking.notes.clone(),
        }
    }

    pub fn validate(&self, tz: Tz) -> Result<ResolvedTimes, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_required_text(
            &mut errors,
            "customerName",
            &self.customer_name,
            MAX_NAME_LEN,
            "Customer name is required",
        );

        let phone = self.customer_phone_number.trim();
        if phone.is_empty() {
            errors.add("customerPhoneNumber", "Phone number is required");
        } else if !is_valid_phone(phone) {
            errors.add("customerPhoneNumber", "Please enter a valid phone number");
        }

        if self.guests_count < 1 {
            errors.add("guestsCount", "Please enter a valid number of guests");
        }

        let start = resolve_field(&mut errors, "startTime", &self.start_time, tz, "Start time is required");
        let end = resolve_field(&mut errors, "endTime", &self.end_time, tz, "End time is required");
        if let (Some(start), Some(end)) = (start, end)
            && end <= start
        {
            errors.add("endTime", "End time must be after start time");
        }

        check_optional_text(&mut errors, "notes", Some(&self.notes), MAX_NOTE_LEN);

        errors.into_result()?;
        match (start, end) {
            (Some(start), Some(end)) => Ok(ResolvedTimes { start, end }),
            _ => Err(ValidationErrors::new()),
        }
    }

    /// New booking stamped with the caller's identity. Rejects a start in the past.
    pub fn into_new_booking(
        self,
        ctx: &SessionContext,
        tz: Tz,
        now: DateTime<Utc>,
    ) -> Result<Booking, ValidationErrors> {
        let times = self.validate(tz)?;
        if times.start < now {
            let mut errors = ValidationErrors::new();
            errors.add("startTime", "Start time cannot be in the past");
            return Err(errors);
        }
        Ok(Booking {
            id: None,
            customer_name: self.customer_name.trim().to_string(),
            customer_phone_number: self.customer_phone_number.trim().to_string(),
            guests_count: self.guests_count,
            start_time: times.start,
            end_time: times.end,
            status: BookingStatus::Booked,
            notes: self.notes,
            org_name: ctx.org_name.clone(),
            store_name: ctx.current_store.clone(),
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            created_at: None,
            updated_at: None,
        })
    }

    /// Edited copy of `existing`. The status is kept: it only moves through
    /// the seat, complete and cancel actions.
    pub fn apply_to(
        self,
        existing: &Booking,
        ctx: &SessionContext,
        tz: Tz,
    ) -> Result<Booking, ValidationErrors> {
        let times = self.validate(tz)?;
        Ok(Booking {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone_number: self.customer_phone_number.trim().to_string(),
            guests_count: self.guests_count,
            start_time: times.start,
            end_time: times.end,
            notes: self.notes,
            org_name: ctx.org_name.clone(),
            store_name: ctx.current_store.clone(),
            updated_by: ctx.user_id.clone(),
            ..existing.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ny() -> Tz {
        chrono_tz::America::New_York
    }

    fn form() -> BookingForm {
        BookingForm {
            customer_name: "Grace".into(),
            customer_phone_number: "5551234567".into(),
            guests_count: 2,
            start_time: "2025-06-01T18:00".into(),
            end_time: "2025-06-01T19:00".into(),
            status: BookingStatus::Booked,
            notes: String::new(),
        }
    }

    #[test]
    fn test_valid_form_resolves_to_utc() {
        let times = form().validate(ny()).unwrap();
        assert_eq!(times.start, Utc.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap());
        assert_eq!(times.end, Utc.with_ymd_and_hms(2025, 6, 1, 23, 0, 0).unwrap());
    }

    #[test]
    fn test_empty_name_is_only_error() {
        let f = BookingForm {
            customer_name: String::new(),
            ..form()
        };
        let errors = f.validate(ny()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains("customerName"));
    }

    #[test]
    fn test_end_not_after_start() {
        let same = BookingForm {
            end_time: "2025-06-01T18:00".into(),
            ..form()
        };
        let errors = same.validate(ny()).unwrap_err();
        assert_eq!(errors.get("endTime"), Some("End time must be after start time"));

        let before = BookingForm {
            customer_name: String::new(),
            end_time: "2025-06-01T17:00".into(),
            ..form()
        };
        assert!(before.validate(ny()).unwrap_err().contains("endTime"));
    }

    #[test]
    fn test_end_compared_after_zone_resolution() {
        // 01:30 on the fall-back night resolves to the earlier instant, so
        // an end of 01:45 is still after it
        let f = BookingForm {
            start_time: "2025-11-02T01:30".into(),
            end_time: "2025-11-02T01:45".into(),
            ..form()
        };
        assert!(f.validate(ny()).is_ok());

        let gap = BookingForm {
            start_time: "2025-03-09T02:30".into(),
            end_time: "2025-03-09T04:00".into(),
            ..form()
        };
        assert!(gap.validate(ny()).unwrap_err().contains("startTime"));
    }

    #[test]
    fn test_phone_and_guests() {
        let f = BookingForm {
            customer_phone_number: "call me".into(),
            guests_count: 0,
            start_time: String::new(),
            ..form()
        };
        let errors = f.validate(ny()).unwrap_err();
        assert_eq!(errors.get("customerPhoneNumber"), Some("Please enter a valid phone number"));
        assert!(errors.contains("guestsCount"));
        assert_eq!(errors.get("startTime"), Some("Start time is required"));
        assert!(!errors.contains("endTime"));
        assert!(is_valid_phone("+1 555-123-4567"));
    }

    #[test]
    fn test_into_new_booking_rejects_past_start() {
        let ctx = SessionContext::new("ada@example.com", "acme", "downtown");
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let booking = form().into_new_booking(&ctx, ny(), now).unwrap();
        assert_eq!(booking.store_name, "downtown");
        assert_eq!(booking.created_by, "ada@example.com");
        assert_eq!(booking.status, BookingStatus::Booked);

        let late = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let errors = form().into_new_booking(&ctx, ny(), late).unwrap_err();
        assert!(errors.contains("startTime"));
    }

    #[test]
    fn test_apply_to_keeps_status() {
        let ctx = SessionContext::new("ada@example.com", "acme", "downtown");
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let seated = Booking {
            id: Some("b1".into()),
            status: BookingStatus::Seated,
            ..form().into_new_booking(&ctx, ny(), now).unwrap()
        };
        let edit = BookingForm {
            status: BookingStatus::Cancelled,
            guests_count: 4,
            ..form()
        };
        let updated = edit.apply_to(&seated, &ctx, ny()).unwrap();
        assert_eq!(updated.status, BookingStatus::Seated);
        assert_eq!(updated.guests_count, 4);
        assert_eq!(updated.id.as_deref(), Some("b1"));
    }

    #[test]
    fn test_from_booking_round_trip() {
        let ctx = SessionContext::new("u", "acme", "downtown");
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let booking = form().into_new_booking(&ctx, ny(), now).unwrap();
        let back = BookingForm::from_booking(&booking, ny());
        assert_eq!(back, form());
    }
}
