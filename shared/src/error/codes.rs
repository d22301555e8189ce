//! Unified error codes for the Crux dashboard
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Store errors
//! - 4xxx: Order errors
//! - 5xxx: Booking errors
//! - 6xxx: Menu errors
//! - 7xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 on the wire so the dashboard and the backend can share
/// the same numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Wrong email or password
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Sign in is not allowed for this account
    SignInNotAllowed = 1006,
    /// A form field was rejected by the auth provider
    FieldError = 1008,
    /// Password reset token is invalid or expired
    ResetTokenInvalid = 1009,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Store ====================
    /// Store not found
    StoreNotFound = 3001,
    /// No current store selected for the session
    StoreNotSelected = 3003,
    /// Store timezone is not recognized
    UnknownTimezone = 3004,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order line not found
    OrderLineNotFound = 4002,
    /// Order has already been delivered
    OrderAlreadyDelivered = 4003,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4004,
    /// Order status transition not allowed
    InvalidOrderTransition = 4005,
    /// Order line status transition not allowed
    InvalidLineTransition = 4006,

    // ==================== 5xxx: Booking ====================
    /// Booking not found
    BookingNotFound = 5001,
    /// Booking status transition not allowed
    InvalidBookingTransition = 5002,
    /// Booking start is in the past
    BookingInPast = 5003,
    /// Local time does not exist in the store timezone (DST gap)
    NonexistentLocalTime = 5005,
    /// Availability slot is not bookable
    SlotUnavailable = 5006,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,

    // ==================== 7xxx: User ====================
    /// User not found
    UserNotFound = 7001,
    /// User is not active
    UserInactive = 7002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Request timed out
    TimeoutError = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// The same action is already in flight
    RequestInFlight = 9005,
    /// The view that issued the request is gone
    ViewClosed = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::SignInNotAllowed => "Sign in is not allowed",
            ErrorCode::FieldError => "A form field was rejected",
            ErrorCode::ResetTokenInvalid => "Password reset link is invalid or has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Store
            ErrorCode::StoreNotFound => "Store not found",
            ErrorCode::StoreNotSelected => "No store selected",
            ErrorCode::UnknownTimezone => "Store timezone is not recognized",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderLineNotFound => "Order line not found",
            ErrorCode::OrderAlreadyDelivered => "Order has already been delivered",
            ErrorCode::OrderAlreadyCancelled => "Order has already been cancelled",
            ErrorCode::InvalidOrderTransition => "Order status change is not allowed",
            ErrorCode::InvalidLineTransition => "Order line status change is not allowed",

            // Booking
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::InvalidBookingTransition => "Booking status change is not allowed",
            ErrorCode::BookingInPast => "Cannot create bookings in the past",
            ErrorCode::NonexistentLocalTime => "Local time does not exist in the store timezone",
            ErrorCode::SlotUnavailable => "Selected slot is not available",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserInactive => "User is not active",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Request timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::RequestInFlight => "Request already in progress",
            ErrorCode::ViewClosed => "View was closed before the request completed",
        }
    }

    /// Map an auth-provider status string onto an error code
    ///
    /// Returns `None` for `"OK"` and for statuses the dashboard does not know.
    pub fn from_auth_status(status: &str) -> Option<Self> {
        match status {
            "FIELD_ERROR" => Some(Self::FieldError),
            "WRONG_CREDENTIALS_ERROR" => Some(Self::InvalidCredentials),
            "SIGN_IN_NOT_ALLOWED" => Some(Self::SignInNotAllowed),
            "RESET_PASSWORD_INVALID_TOKEN_ERROR" => Some(Self::ResetTokenInvalid),
            "TRY_REFRESH_TOKEN" => Some(Self::TokenExpired),
            "UNAUTHORISED" => Some(Self::NotAuthenticated),
            _ => None,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1006 => Ok(ErrorCode::SignInNotAllowed),
            1008 => Ok(ErrorCode::FieldError),
            1009 => Ok(ErrorCode::ResetTokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Store
            3001 => Ok(ErrorCode::StoreNotFound),
            3003 => Ok(ErrorCode::StoreNotSelected),
            3004 => Ok(ErrorCode::UnknownTimezone),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderLineNotFound),
            4003 => Ok(ErrorCode::OrderAlreadyDelivered),
            4004 => Ok(ErrorCode::OrderAlreadyCancelled),
            4005 => Ok(ErrorCode::InvalidOrderTransition),
            4006 => Ok(ErrorCode::InvalidLineTransition),

            // Booking
            5001 => Ok(ErrorCode::BookingNotFound),
            5002 => Ok(ErrorCode::InvalidBookingTransition),
            5003 => Ok(ErrorCode::BookingInPast),
            5005 => Ok(ErrorCode::NonexistentLocalTime),
            5006 => Ok(ErrorCode::SlotUnavailable),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),

            // User
            7001 => Ok(ErrorCode::UserNotFound),
            7002 => Ok(ErrorCode::UserInactive),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::RequestInFlight),
            9006 => Ok(ErrorCode::ViewClosed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
