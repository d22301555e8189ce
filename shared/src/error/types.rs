//! Error types and the backend error body

use super::codes::ErrorCode;
use crate::validation::ValidationErrors;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the domain layer:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level errors, context)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Field-level validation errors, if this error carries any
    pub fn field_errors(&self) -> Option<ValidationErrors> {
        let fields = self.details.as_ref()?.get("fields")?;
        serde_json::from_value(fields.clone()).ok()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .first()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .unwrap_or_else(|| ErrorCode::ValidationFailed.message().to_string());
        let fields = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::with_message(ErrorCode::ValidationFailed, message).with_detail("fields", fields)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// A form field rejected by the backend or the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldError {
    pub id: String,
    pub error: String,
}

/// Error body returned by the backend on a failed request
///
/// The dashboard backend answers either with a numeric `code`, or with an
/// auth-provider style `status` string (`WRONG_CREDENTIALS_ERROR`, ...)
/// plus optional `formFields`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, alias = "error")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_fields: Vec<FormFieldError>,
}

impl ErrorBody {
    /// Resolve the error code, preferring the numeric code over the status string
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .or_else(|| self.status.as_deref().and_then(ErrorCode::from_auth_status))
    }

    /// Convert into an [`AppError`], falling back to `fallback` when no code is present
    pub fn into_app_error(self, fallback: ErrorCode) -> AppError {
        let code = self.error_code().unwrap_or(fallback);
        let message = if self.message.is_empty() {
            self.form_fields
                .first()
                .map(|f| f.error.clone())
                .unwrap_or_else(|| code.message().to_string())
        } else {
            self.message
        };
        let mut err = AppError::with_message(code, message);
        if !self.form_fields.is_empty() {
            let mut fields = ValidationErrors::new();
            for f in self.form_fields {
                fields.add(f.id, f.error);
            }
            let fields = serde_json::to_value(&fields).unwrap_or(Value::Null);
            err = err.with_detail("fields", fields);
        }
        err
    }
}
