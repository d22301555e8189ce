//! Client configuration

use std::time::Duration;

use crate::{ClientResult, NetworkHttpClient};

/// How often the order board re-fetches the order list by default
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Client configuration for connecting to the dashboard backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:8080")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Order list refresh interval in seconds
    pub poll_interval: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            poll_interval: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    /// Load from the environment (and a `.env` file, if present)
    ///
    /// | variable | default |
    /// |---|---|
    /// | `CRUX_SERVER_URL` | `http://localhost:8080` |
    /// | `CRUX_TIMEOUT_SECS` | `30` |
    /// | `CRUX_POLL_INTERVAL_SECS` | `60` |
    /// | `CRUX_TOKEN` | none |
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            base_url: std::env::var("CRUX_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            token: std::env::var("CRUX_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout: std::env::var("CRUX_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            poll_interval: std::env::var("CRUX_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the order refresh interval
    pub fn with_poll_interval(mut self, seconds: u64) -> Self {
        self.poll_interval = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn poll_interval_duration(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(1))
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::from_config(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
