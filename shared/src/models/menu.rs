//! Menu Item Model

use serde::{Deserialize, Serialize};

use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, ValidationErrors, check_optional_text, check_required_text,
};

/// Menu item entity
///
/// An item may be published to several stores at once through
/// `selected_stores`; the backend answers with one record per store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub org_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_stores: Vec<String>,
    pub item_name: String,
    #[serde(default)]
    pub item_description: String,
    #[serde(default)]
    pub item_price: f64,
    #[serde(default)]
    pub item_composition: String,
    /// Whether the order form accepts free-text notes for this item
    #[serde(default)]
    pub customizable: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_by: String,
}

impl MenuItem {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_text(
            &mut errors,
            "itemName",
            &self.item_name,
            MAX_NAME_LEN,
            "Item name is required",
        );
        if !self.item_price.is_finite() || self.item_price <= 0.0 {
            errors.add("itemPrice", "Price must be greater than zero");
        }
        check_optional_text(&mut errors, "itemDescription", Some(self.item_description.as_str()), MAX_NOTE_LEN);
        check_optional_text(&mut errors, "itemComposition", Some(self.item_composition.as_str()), MAX_NOTE_LEN);
        errors.into_result()
    }
}

/// Collapse per-store records of the same item into one entry whose
/// `selected_stores` lists every store it is offered in.
pub fn group_by_item(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut grouped: Vec<MenuItem> = Vec::new();
    for item in items {
        let store = item.store_name.clone();
        match grouped.iter_mut().find(|g| g.item_name == item.item_name) {
            Some(existing) => {
                if let Some(store) = store
                    && !existing.selected_stores.contains(&store)
                {
                    existing.selected_stores.push(store);
                }
            }
            None => {
                let mut first = item;
                if let Some(store) = store
                    && !first.selected_stores.contains(&store)
                {
                    first.selected_stores.push(store);
                }
                grouped.push(first);
            }
        }
    }
    grouped
}
