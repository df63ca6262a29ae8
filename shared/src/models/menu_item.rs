//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// `menu_id` is a plain denormalized tag (not an enforced foreign key).
/// `image` is a URL or an inline data URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub menu_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Free text, grouped/filtered by case-insensitive match
    pub category: String,
    pub image: String,
}

/// Create menu item payload (admin form)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub menu_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub menu_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
}
