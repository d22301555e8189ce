//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Store errors
/// - 4xxx: Order errors
/// - 5xxx: Booking errors
/// - 6xxx: Menu errors
/// - 7xxx: User errors
/// - 8xxx, 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Store errors (3xxx)
    Store,
    /// Order errors (4xxx)
    Order,
    /// Booking errors (5xxx)
    Booking,
    /// Menu errors (6xxx)
    Menu,
    /// User errors (7xxx)
    User,
    /// System errors (8xxx, 9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Store,
            4000..5000 => Self::Order,
            5000..6000 => Self::Booking,
            6000..7000 => Self::Menu,
            7000..8000 => Self::User,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Store => "store",
            Self::Order => "order",
            Self::Booking => "booking",
            Self::Menu => "menu",
            Self::User => "user",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Store);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Menu);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::User);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::FieldError.category(), ErrorCategory::Auth);
        assert_eq!(ErrorCode::UnknownTimezone.category(), ErrorCategory::Store);
        assert_eq!(ErrorCode::InvalidLineTransition.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::BookingInPast.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::UserInactive.category(), ErrorCategory::User);
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Booking).unwrap();
        assert_eq!(json, "\"booking\"");
        let category: ErrorCategory = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(category, ErrorCategory::System);
    }
}
