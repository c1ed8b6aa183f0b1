use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::dish::DishCategory;

/// A priced set menu offered by one chef.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Menu {
    pub id: Uuid,
    pub chef_id: Uuid,
    pub name: String,
    pub dish_count: i32,
    pub price_cents: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A dish placed on a menu, joined with the dish it points to.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MenuItem {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub dish_id: Uuid,
    pub sort_order: i32,
    pub dish_name: String,
    #[sqlx(try_from = "String")]
    pub category: DishCategory,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuWithItems {
    #[serde(flatten)]
    pub menu: Menu,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub name: String,
    #[serde(default)]
    pub dish_count: i32,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuRequest {
    pub name: Option<String>,
    pub dish_count: Option<i32>,
    pub price_cents: Option<i64>,
    pub description: Option<String>,
}

/// Body for POST /menus/{id}/items.
#[derive(Debug, Deserialize)]
pub struct AddMenuItemRequest {
    pub dish_id: Uuid,
}

/// Body for POST /menus/{id}/import.
#[derive(Debug, Deserialize)]
pub struct ImportItemsRequest {
    pub source_menu_id: Uuid,
}
