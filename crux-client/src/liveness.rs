//! Liveness of a view model
//!
//! A view that is torn down while a request is outstanding must not touch
//! its state when the response arrives. Views hold a [`Liveness`]; closing
//! it cancels the underlying token, which also stops background pollers.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct Liveness {
    token: CancellationToken,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Tear down; idempotent
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Resolves once the view is closed
    pub async fn closed(&self) {
        self.token.cancelled().await
    }

    /// Token for tasks that must stop with the view
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run `apply` only while alive; returns `None` when the result was discarded
    pub fn apply<T>(&self, apply: impl FnOnce() -> T) -> Option<T> {
        if self.is_alive() {
            Some(apply())
        } else {
            tracing::debug!("View closed, discarding late response");
            None
        }
    }
}
