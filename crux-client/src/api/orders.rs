use shared::error::{AppError, ErrorCode};
use shared::models::{ALL_STORES, LineStatus, LineStatusUpdate, Order, OrderStatus, SessionContext};
use shared::order::{
    Delivery, can_cancel_line, can_cancel_order, can_edit_order, delivered_order, next_line_action,
    next_order_action, with_status,
};
use shared::response::{ApiResponse, OrdersPayload};

use super::{CruxApi, Echo, echoed};
use crate::ClientResult;
use crate::http::HttpClient;

fn stamp(mut order: Order, ctx: &SessionContext) -> Order {
    order.org_name = ctx.org_name.clone();
    order.store_name = ctx.current_store.clone();
    order.updated_by = ctx.user_id.clone();
    order
}

fn finished(order: &Order) -> AppError {
    let code = match order.status {
        OrderStatus::Delivered => ErrorCode::OrderAlreadyDelivered,
        OrderStatus::Cancelled => ErrorCode::OrderAlreadyCancelled,
        _ => ErrorCode::InvalidOrderTransition,
    };
    AppError::with_message(code, format!("Order {} is {}", order.id, order.status))
}

impl<C: HttpClient> CruxApi<C> {
    /// Every order of the organization, across stores
    pub async fn list_orders(&self, ctx: &SessionContext) -> ClientResult<Vec<Order>> {
        let resp: ApiResponse<OrdersPayload> = self
            .client
            .get(
                "api/order",
                &[("orgName", ctx.org_name.as_str()), ("storeName", ALL_STORES)],
            )
            .await?;
        Ok(resp.data.orders)
    }

    pub async fn create_order(&self, ctx: &SessionContext, order: Order) -> ClientResult<Option<Order>> {
        ctx.require_store()?;
        let mut order = stamp(order, ctx);
        order.created_by = ctx.user_id.clone();
        tracing::info!(customer = %order.customer_name, lines = order.lines.len(), "Creating order");
        let echo: Echo<Order> = self.client.post("api/order/create", &[], &order).await?;
        Ok(echoed(echo))
    }

    /// Save an edited order; only CREATED and CONFIRMED orders can be edited
    pub async fn update_order(&self, ctx: &SessionContext, order: Order) -> ClientResult<Option<Order>> {
        if !can_edit_order(&order) {
            return Err(finished(&order).into());
        }
        let order = stamp(order, ctx);
        tracing::info!(order_id = %order.id, "Updating order");
        let echo: Echo<Order> = self.client.post("api/order/update", &[], &order).await?;
        Ok(echoed(echo))
    }

    /// Move the order one step forward. Delivery goes through [`Self::deliver_order`].
    pub async fn advance_order(&self, ctx: &SessionContext, order: &Order) -> ClientResult<Option<Order>> {
        let action = next_order_action(order).ok_or_else(|| finished(order))?;
        if action.requires_delivery_dialog {
            return Err(AppError::with_message(
                ErrorCode::InvalidOrderTransition,
                "Delivery requires the discount dialog",
            )
            .into());
        }
        let payload = stamp(with_status(order, action.target), ctx);
        tracing::info!(order_id = %order.id, from = %order.status, to = %action.target, "Updating order status");
        let echo: Echo<Order> = self
            .client
            .post("api/order/update/status", &[], &payload)
            .await?;
        Ok(echoed(echo))
    }

    pub async fn cancel_order(&self, ctx: &SessionContext, order: &Order) -> ClientResult<Option<Order>> {
        if !can_cancel_order(order) {
            return Err(finished(order).into());
        }
        let payload = stamp(with_status(order, OrderStatus::Cancelled), ctx);
        tracing::info!(order_id = %order.id, "Cancelling order");
        let echo: Echo<Order> = self
            .client
            .post("api/order/update/status", &[], &payload)
            .await?;
        Ok(echoed(echo))
    }

    /// Hand the order over with the discount from the delivery dialog
    pub async fn deliver_order(
        &self,
        ctx: &SessionContext,
        order: &Order,
        delivery: Delivery,
    ) -> ClientResult<Option<Order>> {
        match next_order_action(order) {
            Some(action) if action.target == OrderStatus::Delivered => {}
            _ => return Err(finished(order).into()),
        }
        let payload = stamp(delivered_order(order, delivery), ctx);
        tracing::info!(
            order_id = %order.id,
            total = payload.total_cost,
            discount = payload.total_discount,
            "Delivering order"
        );
        let echo: Echo<Order> = self
            .client
            .post("api/order/update/status/delivered", &[], &payload)
            .await?;
        Ok(echoed(echo))
    }

    /// Move one line forward; returns the status the line was moved to
    pub async fn advance_line(
        &self,
        ctx: &SessionContext,
        order: &Order,
        line_id: &str,
    ) -> ClientResult<LineStatus> {
        let line = order.line(line_id).ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderLineNotFound, format!("Line {line_id} not found"))
        })?;
        let action = next_line_action(line, order.status).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::InvalidLineTransition,
                format!("Line {line_id} cannot move while order is {}", order.status),
            )
        })?;
        self.post_line_status(ctx, order, line_id, action.target).await?;
        Ok(action.target)
    }

    pub async fn cancel_line(&self, ctx: &SessionContext, order: &Order, line_id: &str) -> ClientResult<()> {
        let line = order.line(line_id).ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderLineNotFound, format!("Line {line_id} not found"))
        })?;
        if order.status.is_terminal() || !can_cancel_line(line) {
            return Err(AppError::with_message(
                ErrorCode::InvalidLineTransition,
                format!("Line {line_id} can no longer be cancelled"),
            )
            .into());
        }
        self.post_line_status(ctx, order, line_id, LineStatus::Cancelled).await
    }

    async fn post_line_status(
        &self,
        ctx: &SessionContext,
        order: &Order,
        line_id: &str,
        status: LineStatus,
    ) -> ClientResult<()> {
        let Some(line) = order.line(line_id) else {
            return Err(AppError::new(ErrorCode::OrderLineNotFound).into());
        };
        let mut line = line.clone();
        line.status = status;
        line.order_id = order.id.clone();
        line.updated_by = ctx.user_id.clone();
        let payload = LineStatusUpdate {
            line,
            org_name: order.org_name.clone(),
            store_name: order.store_name.clone(),
        };
        tracing::info!(order_id = %order.id, line_id, to = %status, "Updating line status");
        let _: serde::de::IgnoredAny = self
            .client
            .post("api/order/details/update/status", &[], &payload)
            .await?;
        Ok(())
    }
}
