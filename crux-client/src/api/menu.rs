use serde::de::IgnoredAny;
use shared::error::ErrorCode;
use shared::models::{MenuItem, SessionContext, group_by_item};
use shared::response::{ApiResponse, ItemsPayload};

use super::{CruxApi, Echo, echoed};
use crate::ClientResult;
use crate::http::HttpClient;

impl<C: HttpClient> CruxApi<C> {
    /// Menu items visible to the caller; org admins see every store
    pub async fn list_menu_items(&self, ctx: &SessionContext) -> ClientResult<Vec<MenuItem>> {
        let resp: ApiResponse<ItemsPayload> = self
            .client
            .get(
                "api/menu-items",
                &[
                    ("orgName", ctx.org_name.as_str()),
                    ("storeName", ctx.menu_store_scope()),
                ],
            )
            .await?;
        Ok(group_by_item(resp.data.items))
    }

    pub async fn create_menu_item(&self, ctx: &SessionContext, item: MenuItem) -> ClientResult<Option<MenuItem>> {
        item.validate()?;
        let item = MenuItem {
            org_name: ctx.org_name.clone(),
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            ..item
        };
        tracing::info!(item = %item.item_name, stores = item.selected_stores.len(), "Creating menu item");
        let echo: Echo<MenuItem> = self.client.post("api/menu-items/create", &[], &item).await?;
        Ok(echoed(echo))
    }

    pub async fn update_menu_item(&self, ctx: &SessionContext, item: MenuItem) -> ClientResult<Option<MenuItem>> {
        item.validate()?;
        let item = MenuItem {
            org_name: ctx.org_name.clone(),
            updated_by: ctx.user_id.clone(),
            ..item
        };
        tracing::info!(item = %item.item_name, "Updating menu item");
        let echo: Echo<MenuItem> = self.client.post("api/menu-items/update", &[], &item).await?;
        Ok(echoed(echo))
    }

    /// Remove `item_name` from `store_name`
    pub async fn delete_menu_item(&self, ctx: &SessionContext, item_name: &str, store_name: &str) -> ClientResult<()> {
        tracing::info!(item = item_name, store = store_name, "Deleting menu item");
        let path = format!("api/menu-items/delete/{item_name}");
        let _: IgnoredAny = self
            .client
            .post(
                &path,
                &[("orgName", ctx.org_name.as_str()), ("storeName", store_name)],
                &serde_json::json!({}),
            )
            .await
            .map_err(|e| e.or_not_found(ErrorCode::MenuItemNotFound))?;
        Ok(())
    }
}
