//! Background order list refresh
//!
//! Re-fetches the order list on a fixed interval until the board is closed.
//! A poll that completes after close is discarded by the board's liveness
//! check.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::board::OrderBoard;
use crate::http::HttpClient;

pub struct OrderPoller<C> {
    board: OrderBoard<C>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl<C: HttpClient + 'static> OrderPoller<C> {
    pub fn new(board: OrderBoard<C>, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            board,
            interval,
            shutdown,
        }
    }

    /// Main loop; the first poll fires one interval after start
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs_f64(), "Order poller started");

        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.shutdown.cancelled() => {
                    break;
                }
            }

            if let Err(e) = self.board.refresh().await {
                tracing::debug!(error = %e, "Order poll failed");
            }
        }

        tracing::info!("Order poller stopped");
    }
}
