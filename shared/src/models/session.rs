//! Identity context of the signed-in user
//!
//! Built once from the session payload issued by the auth provider and
//! handed explicitly to every request builder that needs identity fields.

use serde::{Deserialize, Serialize};

use super::user::StoreRoleAssignment;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::types::Permission;

/// Store value the order list uses to mean "every store of the org"
pub const ALL_STORES: &str = "All";

/// Resolved identity of the current user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SessionUserRepr", into = "SessionUserRepr")]
pub struct SessionContext {
    pub user_id: String,
    pub org_name: String,
    pub current_store: String,
    pub permissions: Vec<Permission>,
    pub store_roles: Vec<StoreRoleAssignment>,
}

impl SessionContext {
    pub fn new(
        user_id: impl Into<String>,
        org_name: impl Into<String>,
        current_store: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            org_name: org_name.into(),
            current_store: current_store.into(),
            ..Default::default()
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(Permission(permission.into()));
        self
    }

    pub fn with_store_role(mut self, assignment: StoreRoleAssignment) -> Self {
        self.store_roles.push(assignment);
        self
    }

    /// Parse the access-token payload (`{"user": {...}}`) or the bare user object
    pub fn from_token_payload(payload: &serde_json::Value) -> serde_json::Result<Self> {
        let user = payload.get("user").unwrap_or(payload);
        serde_json::from_value(user.clone())
    }

    pub fn has_permission(&self, action: &str) -> bool {
        self.permissions.iter().any(|p| p.grants(action))
    }

    pub fn is_org_admin(&self) -> bool {
        self.has_permission(Permission::ORG_ADMIN)
    }

    pub fn is_store_admin(&self) -> bool {
        self.has_permission(Permission::STORE_WRITE)
    }

    pub fn can_manage_user(&self) -> bool {
        self.is_org_admin() || self.has_permission(Permission::USER_WRITE)
    }

    /// Timezone of the current store, `UTC` when the payload does not carry one
    pub fn store_timezone(&self) -> &str {
        self.store_roles
            .iter()
            .find(|r| r.store_name.as_deref() == Some(self.current_store.as_str()))
            .and_then(|r| r.timezone.as_deref())
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or("UTC")
    }

    /// Store filter for the menu list: org admins see every store
    pub fn menu_store_scope(&self) -> &str {
        if self.is_org_admin() {
            ""
        } else {
            &self.current_store
        }
    }

    /// Current store, for writes that must land in one store
    pub fn require_store(&self) -> AppResult<&str> {
        let store = self.current_store.trim();
        if store.is_empty() {
            return Err(AppError::new(ErrorCode::StoreNotSelected));
        }
        Ok(store)
    }

    /// Copy of the context after switching the current store
    pub fn switch_store(&self, store_name: impl Into<String>) -> Self {
        Self {
            current_store: store_name.into(),
            ..self.clone()
        }
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationRef {
    #[serde(default)]
    org_name: String,
}

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionUserRepr {
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    organization: OrganizationRef,
    #[serde(default)]
    current_store: String,
    #[serde(default)]
    permissions: Vec<Permission>,
    #[serde(default)]
    store_roles: Vec<StoreRoleAssignment>,
}

impl From<SessionUserRepr> for SessionContext {
    fn from(repr: SessionUserRepr) -> Self {
        Self {
            user_id: repr.user_id,
            org_name: repr.organization.org_name,
            current_store: repr.current_store,
            permissions: repr.permissions,
            store_roles: repr.store_roles,
        }
    }
}

impl From<SessionContext> for SessionUserRepr {
    fn from(ctx: SessionContext) -> Self {
        Self {
            user_id: ctx.user_id,
            organization: OrganizationRef {
                org_name: ctx.org_name,
            },
            current_store: ctx.current_store,
            permissions: ctx.permissions,
            store_roles: ctx.store_roles,
        }
    }
}
