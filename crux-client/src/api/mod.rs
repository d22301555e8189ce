//! Typed calls against the dashboard backend
//!
//! Every call that needs identity fields takes the caller's
//! [`SessionContext`](shared::SessionContext) explicitly.

mod bookings;
mod menu;
mod orders;
mod roles;
mod stores;
mod users;

use serde::de::{DeserializeOwned, IgnoredAny};
use shared::response::MaybeEnveloped;

use crate::http::HttpClient;

/// Dashboard API over an [`HttpClient`]
#[derive(Debug, Clone)]
pub struct CruxApi<C> {
    client: C,
}

impl<C: HttpClient> CruxApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

/// Response body of a mutation: the entity, a wrapper around it, or
/// something else the caller does not need.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Echo<T> {
    Entity(MaybeEnveloped<T>),
    Other(IgnoredAny),
}

fn echoed<T: DeserializeOwned>(echo: Echo<T>) -> Option<T> {
    match echo {
        Echo::Entity(entity) => Some(entity.into_inner()),
        Echo::Other(_) => None,
    }
}
