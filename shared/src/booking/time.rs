//! Store-local wall clock ↔ UTC conversion
//!
//! Forms and calendars work in the store's local time (`YYYY-MM-DDTHH:MM`);
//! the backend persists UTC. All conversion goes through the zone's rules.
//!
//! DST policy:
//! - a local time inside a spring-forward gap does not exist and is rejected
//! - a local time inside a fall-back overlap resolves to the earlier instant

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use super::zone::resolve_zone;
use crate::error::{AppError, ErrorCode};
use crate::util::format_utc;

/// Format of `datetime-local` inputs
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Date and time are required")]
    Empty,

    #[error("Invalid date/time: {0}")]
    InvalidFormat(String),

    #[error("Unknown timezone: {0:?}")]
    UnknownZone(String),

    #[error("{local} does not exist in {zone} (daylight saving gap)")]
    NonexistentLocalTime { local: String, zone: String },
}

impl From<TimeError> for AppError {
    fn from(err: TimeError) -> Self {
        let code = match &err {
            TimeError::Empty | TimeError::InvalidFormat(_) => ErrorCode::InvalidFormat,
            TimeError::UnknownZone(_) => ErrorCode::UnknownTimezone,
            TimeError::NonexistentLocalTime { .. } => ErrorCode::NonexistentLocalTime,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Parse `YYYY-MM-DDTHH:MM` (seconds optional)
pub fn parse_local_input(value: &str) -> Result<NaiveDateTime, TimeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimeError::Empty);
    }
    NaiveDateTime::parse_from_str(value, LOCAL_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| TimeError::InvalidFormat(value.to_string()))
}

/// Interpret a wall-clock time in `tz`
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, later) => {
            tracing::debug!(%local, zone = tz.name(), %earlier, %later, "Ambiguous local time, using earlier instant");
            Ok(earlier.with_timezone(&Utc))
        }
        LocalResult::None => Err(TimeError::NonexistentLocalTime {
            local: local.format(LOCAL_INPUT_FORMAT).to_string(),
            zone: tz.name().to_string(),
        }),
    }
}

/// Wall-clock form of `instant` in `tz`
pub fn utc_to_local_input(instant: DateTime<Utc>, tz: Tz) -> String {
    instant
        .with_timezone(&tz)
        .format(LOCAL_INPUT_FORMAT)
        .to_string()
}

/// `YYYY-MM-DDTHH:MM` in `zone` → `2025-06-01T13:00:00.000Z`.
///
/// Callers must not submit when this fails.
pub fn to_utc_iso(local: &str, zone: &str) -> Result<String, TimeError> {
    let tz = resolve_zone(zone)?;
    let naive = parse_local_input(local)?;
    local_to_utc(naive, tz).map(format_utc)
}

/// Inverse of [`to_utc_iso`]; accepts any RFC 3339 instant
pub fn to_local_input_string(utc_iso: &str, zone: &str) -> Result<String, TimeError> {
    let tz = resolve_zone(zone)?;
    let instant = parse_instant(utc_iso)?;
    Ok(utc_to_local_input(instant, tz))
}

/// Parse an RFC 3339 instant
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, TimeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimeError::Empty);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimeError::InvalidFormat(value.to_string()))
}

/// Parse a slot start as the backend sends it
///
/// Accepted: RFC 3339, `YYYY-MM-DD HH:MM:SS±HH:MM`, or a naive
/// `YYYY-MM-DD HH:MM[:SS]` which is taken as store-local time.
pub fn parse_slot_start(value: &str, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimeError::Empty);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", LOCAL_INPUT_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| TimeError::InvalidFormat(value.to_string()))?;
    local_to_utc(naive, tz)
}

/// A calendar selection or slot pick is allowed unless it starts strictly in the past
pub fn is_selectable_future(candidate: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    candidate >= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const NY: &str = "America/New_York";

    #[test]
    fn test_round_trip_non_dst_date() {
        let utc = to_utc_iso("2025-06-01T09:00", NY).unwrap();
        assert_eq!(utc, "2025-06-01T13:00:00.000Z");
        assert_eq!(to_local_input_string(&utc, NY).unwrap(), "2025-06-01T09:00");
    }

    #[test]
    fn test_abbreviation_follows_daylight_saving() {
        // EST resolves to New York rules, so summer is UTC-4
        assert_eq!(to_utc_iso("2025-06-01T09:00", "EST").unwrap(), "2025-06-01T13:00:00.000Z");
        assert_eq!(to_utc_iso("2025-01-15T09:00", "EST").unwrap(), "2025-01-15T14:00:00.000Z");
    }

    #[test]
    fn test_spring_forward_gap_rejected() {
        let err = to_utc_iso("2025-03-09T02:30", NY).unwrap_err();
        assert!(matches!(err, TimeError::NonexistentLocalTime { .. }));
    }

    #[test]
    fn test_fall_back_overlap_uses_earlier_instant() {
        assert_eq!(to_utc_iso("2025-11-02T01:30", NY).unwrap(), "2025-11-02T05:30:00.000Z");
    }

    #[test]
    fn test_empty_and_unknown_zone_fail() {
        assert_eq!(to_utc_iso("", NY), Err(TimeError::Empty));
        assert!(matches!(to_utc_iso("2025-06-01T09:00", "Nowhere/Land"), Err(TimeError::UnknownZone(_))));
        assert!(matches!(to_utc_iso("06/01/2025 9am", NY), Err(TimeError::InvalidFormat(_))));
    }

    #[test]
    fn test_local_input_from_offset_instant() {
        let local = to_local_input_string("2025-06-01T15:00:00+02:00", NY).unwrap();
        assert_eq!(local, "2025-06-01T09:00");
    }

    #[test]
    fn test_parse_slot_start_forms() {
        let tz = resolve_zone(NY).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 6, 1, 22, 0, 0).unwrap();
        assert_eq!(parse_slot_start("2025-06-01T22:00:00.000Z", tz).unwrap(), expected);
        assert_eq!(parse_slot_start("2025-06-01 18:00:00-04:00", tz).unwrap(), expected);
        assert_eq!(parse_slot_start("2025-06-01 18:00:00", tz).unwrap(), expected);
        assert_eq!(parse_slot_start("2025-06-01 18:00", tz).unwrap(), expected);
        assert!(parse_slot_start("tomorrow", tz).is_err());
    }

    #[test]
    fn test_is_selectable_future() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(!is_selectable_future(now - Duration::seconds(1), now));
        assert!(is_selectable_future(now + Duration::seconds(1), now));
        assert!(is_selectable_future(now, now));
    }

    #[test]
    fn test_time_error_maps_to_error_code() {
        let err: AppError = TimeError::UnknownZone("X".into()).into();
        assert_eq!(err.code, ErrorCode::UnknownTimezone);
        let err: AppError = TimeError::NonexistentLocalTime {
            local: "2025-03-09T02:30".into(),
            zone: NY.into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NonexistentLocalTime);
    }
}
