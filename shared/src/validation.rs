//! Form validation helpers
//!
//! Field-level errors are collected into [`ValidationErrors`], keyed by the
//! camelCase field name the dashboard forms use, so each message can be shown
//! next to the offending input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ── Text length limits ──────────────────────────────────────────────

/// Customer, item, store and user names
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 32;

/// Minimum phone length accepted by the order and booking forms
pub const MIN_PHONE_LEN: usize = 10;

/// Field name → message, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`; the first message for a field wins
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names with errors, in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn first(&self) -> Option<(&str, &str)> {
        self.0
            .iter()
            .next()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`, keeping existing messages
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, message) in other.0 {
            self.add(field, message);
        }
    }

    /// `Ok(())` when no errors were recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Loose phone check: optional leading `+`, then at least ten digits,
/// spaces or hyphens and nothing else.
pub fn is_valid_phone(value: &str) -> bool {
    let rest = value.strip_prefix('+').unwrap_or(value);
    let count = rest.chars().count();
    count >= MIN_PHONE_LEN
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-')
}

/// Check a required text field (non-blank, within `max_len`)
pub fn check_required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    max_len: usize,
    required_message: &str,
) {
    if value.trim().is_empty() {
        errors.add(field, required_message);
    } else if value.chars().count() > max_len {
        errors.add(field, format!("Must be at most {max_len} characters"));
    }
}

/// Check an optional text field against `max_len`
pub fn check_optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        errors.add(field, format!("Must be at most {max_len} characters"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("5551234567"));
        assert!(is_valid_phone("+1 555-123-4567"));
        assert!(is_valid_phone("555 123 4567"));
        assert!(!is_valid_phone("555123456"));
        assert!(!is_valid_phone("(555) 123-4567"));
        assert!(!is_valid_phone("++15551234567"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_first_message_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("endTime", "End time is required");
        errors.add("endTime", "End time must be after start time");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("endTime"), Some("End time is required"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let mut errors = ValidationErrors::new();
        errors.add("guestsCount", "Please enter a valid number of guests");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.to_string(), "guestsCount: Please enter a valid number of guests");
    }

    #[test]
    fn test_required_text() {
        let mut errors = ValidationErrors::new();
        check_required_text(&mut errors, "customerName", "   ", MAX_NAME_LEN, "Required");
        check_required_text(&mut errors, "notes", &"x".repeat(11), 10, "Required");
        assert_eq!(errors.get("customerName"), Some("Required"));
        assert_eq!(errors.get("notes"), Some("Must be at most 10 characters"));
    }
}
