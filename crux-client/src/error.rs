//! Client error types

use shared::error::{AppError, ErrorCode, FormFieldError};
use shared::validation::ValidationErrors;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with a structured error
    #[error("API error {code}: {message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
        fields: Vec<FormFieldError>,
    },

    /// Backend failed (5xx)
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local form validation failed; nothing was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Domain rule refused the action; nothing was sent
    #[error(transparent)]
    Domain(#[from] AppError),

    /// The same action is already running
    #[error("Request already in flight")]
    Busy,

    /// The view that issued the request has been torn down
    #[error("View closed")]
    Closed,

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Api { code, .. } => *code,
            Self::Server { .. } => ErrorCode::InternalError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Domain(e) => e.code,
            Self::Busy => ErrorCode::RequestInFlight,
            Self::Closed => ErrorCode::ViewClosed,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    /// Narrow a bare "not found" rejection to the resource that was asked for
    pub fn or_not_found(self, specific: ErrorCode) -> Self {
        match self {
            Self::Api {
                status,
                code: ErrorCode::NotFound,
                message,
                fields,
            } => Self::Api {
                status,
                code: specific,
                message,
                fields,
            },
            other => other,
        }
    }

    /// Transport errors, 5xx and unreadable responses
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Server { .. } | Self::InvalidResponse(_) | Self::Serialization(_)
        )
    }

    /// Per-field messages to show next to the inputs, if any
    pub fn field_errors(&self) -> Option<ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::Api { fields, .. } if !fields.is_empty() => {
                let mut errors = ValidationErrors::new();
                for f in fields {
                    errors.add(f.id.clone(), f.error.clone());
                }
                Some(errors)
            }
            Self::Domain(e) => e.field_errors(),
            _ => None,
        }
    }

    /// Text for the transient notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Api { code, .. } => code.message().to_string(),
            Self::Validation(errors) => errors
                .first()
                .map(|(_, msg)| msg.to_string())
                .unwrap_or_else(|| ErrorCode::ValidationFailed.message().to_string()),
            Self::Domain(e) => e.message.clone(),
            Self::Busy => "Please wait for the current request to finish".to_string(),
            Self::Closed => String::new(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
