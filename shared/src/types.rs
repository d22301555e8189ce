//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Permission granted to the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(pub String);

impl Permission {
    /// Organization-wide administration
    pub const ORG_ADMIN: &'static str = "org_admin";
    /// Write access to the current store
    pub const STORE_WRITE: &'static str = "store_write";
    /// User management
    pub const USER_WRITE: &'static str = "user_write";

    /// Check if this permission grants the given action
    ///
    /// `*` grants everything, `prefix_*` grants every action with that prefix.
    pub fn grants(&self, action: &str) -> bool {
        if self.0 == "*" {
            return true;
        }
        if let Some(prefix) = self.0.strip_suffix('*') {
            return action.starts_with(prefix);
        }
        self.0 == action
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
