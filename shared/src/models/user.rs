//! User, Role and Organization Models

use serde::{Deserialize, Serialize};

use crate::validation::{MAX_NAME_LEN, ValidationErrors, check_required_text, is_valid_phone};

/// Roles a user holds in one store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRoleAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default)]
    pub role_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_current_store: Option<bool>,
    /// Timezone of the store, when the session payload carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Dashboard user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub user_type: String,
    /// Only sent on create
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub org_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_roles: Option<Vec<StoreRoleAssignment>>,
}

impl User {
    /// Field checks for the user form; `creating` also requires a password
    pub fn validate(&self, creating: bool) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = self.email_id.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {}
            _ => errors.add("emailId", "Invalid email address"),
        }
        check_required_text(
            &mut errors,
            "firstName",
            &self.first_name,
            MAX_NAME_LEN,
            "First name is required",
        );
        if !self.phone_number.trim().is_empty() && !is_valid_phone(&self.phone_number) {
            errors.add("phoneNumber", "Invalid phone number");
        }
        if creating && self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors.into_result()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Role entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_name: String,
    pub role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Organization entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub org_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub timezone: String,
}

/// Body of the "switch current store" call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStoreUpdate {
    pub user_id: String,
    pub org_name: String,
    pub store_name: String,
}
