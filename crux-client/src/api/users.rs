use serde::de::IgnoredAny;
use shared::error::{AppError, ErrorCode};
use shared::models::{CurrentStoreUpdate, SessionContext, User};
use shared::response::{ApiResponse, MaybeEnveloped, UsersPayload};

use super::CruxApi;
use crate::ClientResult;
use crate::http::HttpClient;

impl<C: HttpClient> CruxApi<C> {
    pub async fn list_users(&self, ctx: &SessionContext) -> ClientResult<Vec<User>> {
        let resp: ApiResponse<UsersPayload> = self
            .client
            .get(
                "api/user",
                &[
                    ("orgName", ctx.org_name.as_str()),
                    ("storeName", ctx.current_store.as_str()),
                ],
            )
            .await?;
        Ok(resp.data.users)
    }

    /// Fetch one user; deactivated accounts are refused
    pub async fn get_user(&self, user_id: &str) -> ClientResult<User> {
        let path = format!("api/user/{user_id}");
        let resp: MaybeEnveloped<User> = self
            .client
            .get(&path, &[])
            .await
            .map_err(|e| e.or_not_found(ErrorCode::UserNotFound))?;
        let user = resp.into_inner();
        if !user.is_active {
            tracing::warn!(user_id, "Inactive user");
            return Err(AppError::with_message(ErrorCode::UserInactive, format!("User {user_id} is not active")).into());
        }
        Ok(user)
    }

    pub async fn create_user(&self, ctx: &SessionContext, user: User) -> ClientResult<()> {
        if !ctx.can_manage_user() {
            return Err(AppError::permission_denied("Cannot manage users").into());
        }
        user.validate(true)?;
        let user = User {
            user_id: user.email_id.trim().to_string(),
            org_name: ctx.org_name.clone(),
            created_by: ctx.user_id.clone(),
            updated_by: ctx.user_id.clone(),
            ..user
        };
        tracing::info!(user_id = %user.user_id, "Creating user");
        let _: IgnoredAny = self
            .client
            .post("api/user/create", &[("orgName", ctx.org_name.as_str())], &user)
            .await?;
        Ok(())
    }

    pub async fn update_user(&self, ctx: &SessionContext, user: User) -> ClientResult<()> {
        if !ctx.can_manage_user() && user.user_id != ctx.user_id {
            return Err(AppError::permission_denied("Cannot manage users").into());
        }
        user.validate(false)?;
        let user = User {
            org_name: ctx.org_name.clone(),
            updated_by: ctx.user_id.clone(),
            ..user
        };
        tracing::info!(user_id = %user.user_id, "Updating user");
        let _: IgnoredAny = self
            .client
            .post(
                "api/user/update",
                &[
                    ("orgName", ctx.org_name.as_str()),
                    ("storeName", user.store_name.as_str()),
                ],
                &user,
            )
            .await?;
        Ok(())
    }

    pub async fn set_user_active(&self, ctx: &SessionContext, user: &User, active: bool) -> ClientResult<()> {
        if !ctx.can_manage_user() {
            return Err(AppError::permission_denied("Cannot manage users").into());
        }
        let path = if active {
            "api/user/activate"
        } else {
            "api/user/deactivate"
        };
        let user = User {
            is_active: active,
            updated_by: ctx.user_id.clone(),
            ..user.clone()
        };
        tracing::info!(user_id = %user.user_id, active, "Changing user state");
        let _: IgnoredAny = self
            .client
            .post(path, &[("userId", user.user_id.as_str())], &user)
            .await?;
        Ok(())
    }

    /// Switch the caller's current store; returns the updated session
    pub async fn switch_current_store(&self, ctx: &SessionContext, store_name: &str) -> ClientResult<SessionContext> {
        let body = CurrentStoreUpdate {
            user_id: ctx.user_id.clone(),
            org_name: ctx.org_name.clone(),
            store_name: store_name.to_string(),
        };
        tracing::info!(user_id = %ctx.user_id, store = store_name, "Switching current store");
        let _: IgnoredAny = self.client.post("api/user/currentstore/update", &[], &body).await?;
        Ok(ctx.switch_store(store_name))
    }
}
