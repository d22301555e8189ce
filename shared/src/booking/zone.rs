//! Store timezone resolution
//!
//! Stores are configured with either an IANA name or one of the short
//! abbreviations the dashboard historically offered. Abbreviations map to a
//! DST-observing region so conversions follow the region's rules all year.

use chrono_tz::Tz;

use super::TimeError;

/// Abbreviation → IANA zone
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("UTC", "UTC"),
    ("GMT", "UTC"),
    ("EST", "America/New_York"),
    ("EDT", "America/New_York"),
    ("CST", "America/Chicago"),
    ("CDT", "America/Chicago"),
    ("MST", "America/Denver"),
    ("MDT", "America/Denver"),
    ("PST", "America/Los_Angeles"),
    ("PDT", "America/Los_Angeles"),
    ("AKST", "America/Anchorage"),
    ("AKDT", "America/Anchorage"),
    ("HST", "Pacific/Honolulu"),
];

/// Resolve an IANA name or a known abbreviation
pub fn resolve_zone(name: &str) -> Result<Tz, TimeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TimeError::UnknownZone(String::new()));
    }
    if let Some((_, iana)) = ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(name))
    {
        return iana
            .parse::<Tz>()
            .map_err(|_| TimeError::UnknownZone(name.to_string()));
    }
    name.parse::<Tz>()
        .map_err(|_| TimeError::UnknownZone(name.to_string()))
}

/// IANA name a zone string resolves to, for storing the structured form
pub fn canonical_zone_name(name: &str) -> Result<&'static str, TimeError> {
    resolve_zone(name).map(|tz| tz.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_iana_and_abbreviation() {
        assert_eq!(resolve_zone("America/New_York").unwrap(), chrono_tz::America::New_York);
        assert_eq!(resolve_zone("est").unwrap(), chrono_tz::America::New_York);
        assert_eq!(resolve_zone(" PST ").unwrap(), chrono_tz::America::Los_Angeles);
        assert_eq!(canonical_zone_name("HST").unwrap(), "Pacific/Honolulu");
        assert_eq!(resolve_zone("UTC").unwrap(), Tz::UTC);
    }

    #[test]
    fn test_unknown_zone() {
        assert!(matches!(resolve_zone("Mars/Olympus"), Err(TimeError::UnknownZone(_))));
        assert!(matches!(resolve_zone(""), Err(TimeError::UnknownZone(_))));
    }
}
