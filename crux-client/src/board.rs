//! Order board view model
//!
//! Holds the order list shown on the orders screen and runs every order
//! action through the lifecycle rules, the in-flight guard and the
//! liveness check. Failures are logged and turned into a notice; local
//! state only changes after a successful response.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shared::error::{AppError, ErrorCode};
use shared::models::{LineStatus, Order, SessionContext};
use shared::order::{
    DiscountInput, OrderEntry, OrderFilter, OrderForm, mark_line_delivered, next_line_action,
    store_options,
};
use tokio::task::JoinHandle;

use crate::api::CruxApi;
use crate::guard::InFlight;
use crate::http::HttpClient;
use crate::liveness::Liveness;
use crate::poller::OrderPoller;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
struct BoardState {
    orders: Vec<OrderEntry>,
    last_refreshed_at: Option<DateTime<Utc>>,
    notice: Option<String>,
}

pub struct OrderBoard<C> {
    api: Arc<CruxApi<C>>,
    ctx: SessionContext,
    state: Arc<Mutex<BoardState>>,
    in_flight: InFlight,
    liveness: Liveness,
}

impl<C> Clone for OrderBoard<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            ctx: self.ctx.clone(),
            state: self.state.clone(),
            in_flight: self.in_flight.clone(),
            liveness: self.liveness.clone(),
        }
    }
}

impl<C: HttpClient + 'static> OrderBoard<C> {
    pub fn new(api: Arc<CruxApi<C>>, ctx: SessionContext) -> Self {
        Self {
            api,
            ctx,
            state: Arc::new(Mutex::new(BoardState::default())),
            in_flight: InFlight::new(),
            liveness: Liveness::new(),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Entries as displayed, including pending local changes
    pub fn orders(&self) -> Vec<OrderEntry> {
        self.state.lock().orders.clone()
    }

    /// Entries matching the list toolbar filter
    pub fn filtered(&self, filter: &OrderFilter) -> Vec<OrderEntry> {
        self.state
            .lock()
            .orders
            .iter()
            .filter(|e| filter.matches(e.current()))
            .cloned()
            .collect()
    }

    /// Store names for the store facet
    pub fn store_options(&self) -> Vec<String> {
        store_options(self.state.lock().orders.iter().map(OrderEntry::current))
    }

    pub fn order(&self, order_id: &str) -> Option<Order> {
        self.state
            .lock()
            .orders
            .iter()
            .find(|e| e.id() == order_id)
            .map(|e| e.current().clone())
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().last_refreshed_at
    }

    /// Pending user-facing notice, cleared on read
    pub fn take_notice(&self) -> Option<String> {
        self.state.lock().notice.take()
    }

    /// Whether an action is running; the UI disables its controls meanwhile
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_in_flight()
    }

    pub fn is_open(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Re-fetch the full order list. Not guarded: overlapping refreshes are
    /// harmless, the last response wins.
    pub async fn refresh(&self) -> ClientResult<()> {
        match self.api.list_orders(&self.ctx).await {
            Ok(orders) => self
                .liveness
                .apply(|| self.replace_orders(orders))
                .ok_or(ClientError::Closed),
            Err(e) => {
                self.report("refresh", &e);
                Err(e)
            }
        }
    }

    /// Replace the list with a server copy, reconciling pending entries
    pub fn replace_orders(&self, orders: Vec<Order>) {
        let mut state = self.state.lock();
        let mut previous = std::mem::take(&mut state.orders);
        state.orders = orders
            .into_iter()
            .map(|order| match previous.iter().position(|e| e.id() == order.id) {
                Some(i) => previous.swap_remove(i).reconcile(order),
                None => OrderEntry::Synced(order),
            })
            .collect();
        state.last_refreshed_at = Some(Utc::now());
        tracing::debug!(orders = state.orders.len(), "Order list replaced");
    }

    pub async fn create(&self, form: OrderForm) -> ClientResult<()> {
        let order = form.into_new_order(&self.ctx)?;
        self.submit("create order", async {
            self.api.create_order(&self.ctx, order).await.map(drop)
        })
        .await
    }

    pub async fn update(&self, order_id: &str, form: OrderForm) -> ClientResult<()> {
        let existing = self.find(order_id)?;
        let order = form.apply_to(&existing, &self.ctx)?;
        self.submit("update order", async {
            self.api.update_order(&self.ctx, order).await.map(drop)
        })
        .await
    }

    /// Confirm, process or ready the order
    pub async fn advance(&self, order_id: &str) -> ClientResult<()> {
        let order = self.find(order_id)?;
        self.submit("advance order", async {
            self.api.advance_order(&self.ctx, &order).await.map(drop)
        })
        .await
    }

    pub async fn cancel(&self, order_id: &str) -> ClientResult<()> {
        let order = self.find(order_id)?;
        self.submit("cancel order", async {
            self.api.cancel_order(&self.ctx, &order).await.map(drop)
        })
        .await
    }

    /// Commit the delivery dialog
    pub async fn deliver(&self, order_id: &str, discount: &DiscountInput) -> ClientResult<()> {
        let order = self.find(order_id)?;
        let delivery = discount.delivery()?;
        self.submit("deliver order", async {
            self.api.deliver_order(&self.ctx, &order, delivery).await.map(drop)
        })
        .await
    }

    /// Move a line forward. Delivering a line is shown before the server
    /// confirms it and rolled back if the push fails; other moves are applied
    /// once confirmed. Either way the entry stays pending until the next
    /// refresh.
    pub async fn advance_line(&self, order_id: &str, line_id: &str) -> ClientResult<LineStatus> {
        let order = self.find(order_id)?;
        let delivers = order
            .line(line_id)
            .and_then(|line| next_line_action(line, order.status))
            .is_some_and(|action| action.target == LineStatus::Delivered);
        let optimistic = delivers && self.liveness.is_alive() && !self.in_flight.is_in_flight();
        if optimistic {
            self.update_pending(order_id, |current| mark_line_delivered(current, line_id));
        }

        let target = match self
            .guarded("advance line", self.api.advance_line(&self.ctx, &order, line_id))
            .await
        {
            Ok(target) => target,
            Err(e) => {
                if optimistic {
                    self.liveness.apply(|| self.rollback_pending(order_id));
                }
                return Err(e);
            }
        };
        if !optimistic {
            self.liveness.apply(|| {
                self.update_pending(order_id, |current| {
                    if target == LineStatus::Delivered {
                        mark_line_delivered(current, line_id)
                    } else {
                        with_line_status(current, line_id, target)
                    }
                })
            });
        }
        Ok(target)
    }

    pub async fn cancel_line(&self, order_id: &str, line_id: &str) -> ClientResult<()> {
        let order = self.find(order_id)?;
        self.guarded("cancel line", self.api.cancel_line(&self.ctx, &order, line_id))
            .await?;
        self.liveness.apply(|| {
            self.update_pending(order_id, |current| {
                with_line_status(current, line_id, LineStatus::Cancelled)
            })
        });
        Ok(())
    }

    /// Start the background refresh loop; it stops when the board closes
    pub fn start_polling(&self, interval: Duration) -> JoinHandle<()> {
        let poller = OrderPoller::new(self.clone(), interval, self.liveness.token());
        tokio::spawn(poller.run())
    }

    /// Tear the board down; late responses and polls become no-ops
    pub fn close(&self) {
        tracing::debug!("Order board closed");
        self.liveness.close();
    }

    fn find(&self, order_id: &str) -> ClientResult<Order> {
        self.order(order_id).ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found")).into()
        })
    }

    fn update_pending(&self, order_id: &str, change: impl FnOnce(&Order) -> Order) {
        let mut state = self.state.lock();
        if let Some(entry) = state.orders.iter_mut().find(|e| e.id() == order_id) {
            let optimistic = change(entry.current());
            *entry = entry.clone().apply_optimistic(optimistic);
        }
    }

    /// Back to the last server copy
    fn rollback_pending(&self, order_id: &str) {
        let mut state = self.state.lock();
        if let Some(entry) = state.orders.iter_mut().find(|e| e.id() == order_id) {
            tracing::debug!(order_id, "Rolling back local line change");
            *entry = entry.clone().rollback();
        }
    }

    /// Run a mutation under the in-flight guard
    async fn guarded<T>(&self, action: &str, fut: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
        if !self.liveness.is_alive() {
            return Err(ClientError::Closed);
        }
        self.in_flight.run(fut).await.inspect_err(|e| self.report(action, e))
    }

    /// [`Self::guarded`], then refresh the list
    async fn submit<T>(&self, action: &str, fut: impl Future<Output = ClientResult<T>>) -> ClientResult<T> {
        let value = self.guarded(action, fut).await?;
        if self.liveness.is_alive() {
            // the mutation already went through; a failed refresh only leaves a notice
            let _ = self.refresh().await;
        } else {
            tracing::debug!(action, "Board closed before response, skipping refresh");
        }
        Ok(value)
    }

    fn report(&self, action: &str, err: &ClientError) {
        match err {
            ClientError::Busy | ClientError::Closed => return,
            e if e.is_remote_failure() => {
                let category = e.code().category().name();
                tracing::error!(action, category, error = %e, "Order action failed")
            }
            e => tracing::warn!(action, code = %e.code(), error = %e, "Order action rejected"),
        }
        let message = err.user_message();
        self.liveness.apply(|| self.state.lock().notice = Some(message));
    }
}

fn with_line_status(order: &Order, line_id: &str, status: LineStatus) -> Order {
    let mut order = order.clone();
    if let Some(line) = order.lines.iter_mut().find(|l| l.id == line_id) {
        line.status = status;
    }
    order
}
