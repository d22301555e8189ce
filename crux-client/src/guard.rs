//! Re-entrancy guard for user-triggered requests
//!
//! The flag is set when an action starts and cleared when the returned
//! guard drops, on success, failure and cancellation alike. A second
//! attempt while the flag is set fails fast with [`ClientError::Busy`].

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> ClientResult<InFlightGuard> {
        self.flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(InFlightGuard {
            flag: self.flag.clone(),
        })
    }

    /// Run `fut` while holding the flag
    pub async fn run<T, F>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let _guard = match self.try_begin() {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!("Action ignored, previous request still in flight");
                return Err(e);
            }
        };
        fut.await
    }
}

/// Clears the in-flight flag on drop
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
