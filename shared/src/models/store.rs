//! Store Model
//!
//! Opening hours are a structured local-time pair per weekday. The zone they
//! are expressed in is the store's `timezone`, stored once on the store.
//! Older records carry `["09:00 EST", "19:00 EST"]` pairs; those still
//! deserialize, the zone suffix is dropped in favour of `timezone`.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::booking::resolve_zone;
use crate::validation::{MAX_NAME_LEN, ValidationErrors, check_required_text, is_valid_phone};

/// Opening and closing wall-clock time for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DayHoursRepr", into = "DayHoursRepr")]
pub struct DayHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl DayHours {
    /// Hours a newly enabled day starts with
    pub fn default_open() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Whether `time` falls in `[open, close)`; a close before open spans midnight
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.open <= self.close {
            time >= self.open && time < self.close
        } else {
            time >= self.open || time < self.close
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DayHoursRepr {
    Structured { open: String, close: String },
    Legacy([String; 2]),
}

/// Parse `HH:MM`, `HH:MM:SS`, or the legacy `HH:MM TZ`
fn parse_wall_time(value: &str) -> Result<NaiveTime, String> {
    let time = value.split_whitespace().next().unwrap_or_default();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| format!("invalid store hour: {value:?}"))
}

impl TryFrom<DayHoursRepr> for DayHours {
    type Error = String;

    fn try_from(repr: DayHoursRepr) -> Result<Self, Self::Error> {
        let (open, close) = match repr {
            DayHoursRepr::Structured { open, close } => (open, close),
            DayHoursRepr::Legacy([open, close]) => (open, close),
        };
        Ok(Self {
            open: parse_wall_time(&open)?,
            close: parse_wall_time(&close)?,
        })
    }
}

impl From<DayHours> for DayHoursRepr {
    fn from(hours: DayHours) -> Self {
        DayHoursRepr::Structured {
            open: hours.open.format("%H:%M").to_string(),
            close: hours.close.format("%H:%M").to_string(),
        }
    }
}

/// Weekly opening hours; `None` means closed that day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHours {
    #[serde(default)]
    pub monday: Option<DayHours>,
    #[serde(default)]
    pub tuesday: Option<DayHours>,
    #[serde(default)]
    pub wednesday: Option<DayHours>,
    #[serde(default)]
    pub thursday: Option<DayHours>,
    #[serde(default)]
    pub friday: Option<DayHours>,
    #[serde(default)]
    pub saturday: Option<DayHours>,
    #[serde(default)]
    pub sunday: Option<DayHours>,
}

impl StoreHours {
    pub fn day(&self, weekday: Weekday) -> Option<DayHours> {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn set_day(&mut self, weekday: Weekday, hours: Option<DayHours>) {
        let slot = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = hours;
    }
}

/// Store entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub store_id: String,
    pub store_name: String,
    /// IANA zone or one of the dashboard abbreviations (EST, PST, ...)
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default, rename = "storeHour")]
    pub store_hours: StoreHours,
    #[serde(default)]
    pub dine_in_capacity: u32,
    #[serde(default)]
    pub slot_duration_minutes: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub trunk_phone_number: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
}

impl Store {
    /// Field checks for the store form
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_text(
            &mut errors,
            "storeName",
            &self.store_name,
            MAX_NAME_LEN,
            "Store name is required",
        );
        if resolve_zone(&self.timezone).is_err() {
            errors.add("timezone", format!("Unknown timezone {:?}", self.timezone));
        }
        if !self.phone_number.trim().is_empty() && !is_valid_phone(&self.phone_number) {
            errors.add("phoneNumber", "Invalid phone number");
        }
        errors.into_result()
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}
