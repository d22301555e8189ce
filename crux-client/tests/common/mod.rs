// crux-client/tests/common/mod.rs
// In-process mock of the dashboard backend

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crux_client::{ClientConfig, CruxApi, NetworkHttpClient};
use shared::models::{
    AvailabilitySlot, Booking, BookingStatus, LineStatus, Order, OrderLine, OrderStatus, Role,
    SessionContext, Store,
};

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub orders: Vec<Order>,
    pub bookings: Vec<Booking>,
    pub slots: Vec<AvailabilitySlot>,
    pub stores: Vec<Store>,
    pub roles: Vec<Role>,
    pub requests: Vec<Recorded>,
    /// Answer the next request with this status and body
    pub fail_next: Option<(StatusCode, Value)>,
    /// Hold every response this long
    pub delay: Option<Duration>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

pub struct MockServer {
    pub backend: SharedBackend,
    pub base_url: String,
}

impl MockServer {
    pub async fn start(backend: Backend) -> Self {
        let backend = Arc::new(Mutex::new(backend));
        let app = Router::new().fallback(handle).with_state(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            backend,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn api(&self) -> Arc<CruxApi<NetworkHttpClient>> {
        let client = ClientConfig::new(&self.base_url)
            .with_timeout(5)
            .with_token("test-token")
            .build_http_client()
            .unwrap();
        Arc::new(CruxApi::new(client))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.backend.lock().requests.clone()
    }

    /// Requests other than reads
    pub fn writes(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::POST)
            .collect()
    }
}

pub fn ctx() -> SessionContext {
    SessionContext::new("ada@example.com", "acme", "downtown")
}

pub fn line(id: &str, order_id: &str, status: LineStatus, price: f64, quantity: i32) -> OrderLine {
    OrderLine {
        id: id.into(),
        order_id: order_id.into(),
        status,
        item: format!("item-{id}"),
        item_price: price,
        quantity,
        ..Default::default()
    }
}

pub fn order(id: &str, status: OrderStatus, lines: Vec<OrderLine>) -> Order {
    let total_cost = lines.iter().map(|l| l.item_price * f64::from(l.quantity)).sum();
    Order {
        id: id.into(),
        customer_name: "Grace".into(),
        customer_phone_number: "5551234567".into(),
        status,
        total_cost,
        org_name: "acme".into(),
        store_name: "downtown".into(),
        lines,
        ..Default::default()
    }
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, axum::Json(body)).into_response()
}

async fn handle(State(backend): State<SharedBackend>, method: Method, uri: Uri, body: String) -> Response {
    let query: HashMap<String, String> = reqwest::Url::parse(&format!("http://mock{uri}"))
        .map(|u| u.query_pairs().into_owned().collect())
        .unwrap_or_default();
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let path = uri.path().to_string();

    let delay = {
        let mut state = backend.lock();
        state.requests.push(Recorded {
            method: method.clone(),
            path: path.clone(),
            query: query.clone(),
            body: body.clone(),
        });
        state.delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let mut state = backend.lock();
    if let Some((status, body)) = state.fail_next.take() {
        return reply(status, body);
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "order"]) => reply(StatusCode::OK, json!({ "data": { "orders": state.orders } })),
        ("POST", ["api", "order", "create"]) => {
            let mut order: Order = serde_json::from_value(body).unwrap();
            order.id = format!("o-{}", state.orders.len() + 1);
            state.orders.push(order);
            reply(StatusCode::CREATED, json!({ "message": "Order created" }))
        }
        ("POST", ["api", "order", "update"])
        | ("POST", ["api", "order", "update", "status"]) => {
            let update: Order = serde_json::from_value(body).unwrap();
            match state.orders.iter_mut().find(|o| o.id == update.id) {
                Some(existing) => {
                    *existing = update.clone();
                    reply(StatusCode::OK, json!(update))
                }
                None => reply(StatusCode::NOT_FOUND, json!({ "code": 4001, "message": "Order not found" })),
            }
        }
        ("POST", ["api", "order", "update", "status", "delivered"]) => {
            let update: Order = serde_json::from_value(body).unwrap();
            if let Some(existing) = state.orders.iter_mut().find(|o| o.id == update.id) {
                *existing = update.clone();
            }
            reply(StatusCode::OK, json!({ "data": update }))
        }
        ("POST", ["api", "order", "details", "update", "status"]) => {
            let line: OrderLine = serde_json::from_value(body).unwrap();
            if let Some(existing) = state
                .orders
                .iter_mut()
                .find(|o| o.id == line.order_id)
                .and_then(|o| o.lines.iter_mut().find(|l| l.id == line.id))
            {
                existing.status = line.status;
            }
            (StatusCode::OK, "").into_response()
        }
        ("GET", ["api", "store"]) => reply(StatusCode::OK, json!(state.stores)),
        ("GET", ["api", "role"]) => reply(StatusCode::OK, json!({ "data": state.roles })),
        ("GET", ["api", "booking"]) => reply(StatusCode::OK, json!(state.bookings)),
        ("GET", ["api", "booking", "availability"]) => {
            reply(StatusCode::OK, json!({ "data": { "slots": state.slots } }))
        }
        ("POST", ["api", "booking", "create"]) => {
            let mut booking: Booking = serde_json::from_value(body).unwrap();
            booking.id = Some(format!("b-{}", state.bookings.len() + 1));
            state.bookings.push(booking.clone());
            reply(StatusCode::OK, json!({ "data": booking }))
        }
        ("POST", ["api", "booking", "update"]) => {
            let update: Booking = serde_json::from_value(body).unwrap();
            match state.bookings.iter_mut().find(|b| b.id == update.id) {
                Some(existing) => {
                    *existing = update.clone();
                    reply(StatusCode::OK, json!({ "data": update }))
                }
                None => reply(StatusCode::NOT_FOUND, json!({ "code": 5001, "message": "Booking not found" })),
            }
        }
        ("POST", ["api", "booking", id, action]) => {
            let status = match *action {
                "seat" => BookingStatus::Seated,
                "complete" => BookingStatus::Completed,
                "cancel" => BookingStatus::Cancelled,
                _ => return reply(StatusCode::NOT_FOUND, json!({ "message": "Unknown action" })),
            };
            match state.bookings.iter_mut().find(|b| b.id.as_deref() == Some(*id)) {
                Some(booking) => {
                    booking.status = status;
                    reply(StatusCode::OK, json!(booking))
                }
                None => reply(StatusCode::NOT_FOUND, json!({ "code": 5001, "message": "Booking not found" })),
            }
        }
        _ => reply(StatusCode::OK, json!({ "status": "OK" })),
    }
}
