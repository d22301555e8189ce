//! Data models
//!
//! Wire shapes of the dashboard backend. All payloads are camelCase.

pub mod availability;
pub mod booking;
pub mod menu;
pub mod order;
pub mod session;
pub mod store;
pub mod user;

// Re-exports
pub use availability::*;
pub use booking::*;
pub use menu::*;
pub use order::*;
pub use session::*;
pub use store::*;
pub use user::*;
