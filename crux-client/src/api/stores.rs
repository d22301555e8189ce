use serde::de::IgnoredAny;
use shared::booking::canonical_zone_name;
use shared::error::{AppError, ErrorCode};
use shared::models::{SessionContext, Store};
use shared::response::MaybeEnveloped;

use super::CruxApi;
use crate::ClientResult;
use crate::http::HttpClient;

impl<C: HttpClient> CruxApi<C> {
    pub async fn list_stores(&self, ctx: &SessionContext) -> ClientResult<Vec<Store>> {
        let resp: MaybeEnveloped<Vec<Store>> = self
            .client
            .get("api/store", &[("orgName", ctx.org_name.as_str())])
            .await?;
        Ok(resp.into_inner())
    }

    /// Create a store; the timezone is stored as its IANA name
    pub async fn create_store(&self, ctx: &SessionContext, store: Store) -> ClientResult<()> {
        store.validate()?;
        let timezone = canonical_zone_name(&store.timezone).map_err(AppError::from)?;
        let store = Store {
            org_name: ctx.org_name.clone(),
            timezone: timezone.to_string(),
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            ..store
        };
        tracing::info!(store = %store.store_name, "Creating store");
        let _: IgnoredAny = self.client.post("api/store/create", &[], &store).await?;
        Ok(())
    }

    pub async fn update_store(&self, ctx: &SessionContext, store: Store) -> ClientResult<()> {
        store.validate()?;
        let timezone = canonical_zone_name(&store.timezone).map_err(AppError::from)?;
        let store = Store {
            org_name: ctx.org_name.clone(),
            timezone: timezone.to_string(),
            updated_by: ctx.user_id.clone(),
            ..store
        };
        tracing::info!(store = %store.store_name, "Updating store");
        let _: IgnoredAny = self.client.post("api/store/update", &[], &store).await?;
        Ok(())
    }

    pub async fn set_store_active(&self, ctx: &SessionContext, store_name: &str, active: bool) -> ClientResult<()> {
        let path = if active {
            "api/store/activate"
        } else {
            "api/store/deactivate"
        };
        tracing::info!(store = store_name, active, "Changing store state");
        let _: IgnoredAny = self
            .client
            .post(
                path,
                &[("orgName", ctx.org_name.as_str()), ("storeName", store_name)],
                &serde_json::json!({}),
            )
            .await
            .map_err(|e| e.or_not_found(ErrorCode::StoreNotFound))?;
        Ok(())
    }
}
