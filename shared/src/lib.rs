//! Shared types for the Crux dashboard
//!
//! Domain models, the order lifecycle, booking time resolution, form
//! validation and error codes used by the client crate. No I/O.

pub mod booking;
pub mod error;
pub mod models;
pub mod order;
pub mod response;
pub mod types;
pub mod util;
pub mod validation;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::SessionContext;
pub use response::{ApiResponse, MaybeEnveloped};
pub use validation::ValidationErrors;
