//! Crux Client - dashboard core over the REST backend
//!
//! Typed API calls with explicit identity, plus the order board and
//! booking desk view models that drive the dashboard screens.

pub mod api;
pub mod board;
pub mod config;
pub mod desk;
pub mod error;
pub mod guard;
pub mod http;
pub mod liveness;
pub mod logging;
pub mod poller;

pub use api::CruxApi;
pub use board::OrderBoard;
pub use config::ClientConfig;
pub use desk::BookingDesk;
pub use error::{ClientError, ClientResult};
pub use guard::{InFlight, InFlightGuard};
pub use http::{HttpClient, NetworkHttpClient};
pub use liveness::Liveness;
pub use poller::OrderPoller;

// Re-export shared types for convenience
pub use shared::SessionContext;
pub use shared::response::{ApiResponse, MaybeEnveloped};
