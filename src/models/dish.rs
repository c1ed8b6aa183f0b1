use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

text_enum! {
    DishCategory as "dish category" {
        Cold => "cold",
        Hot => "hot",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dish {
    pub id: Uuid,
    pub chef_id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub category: DishCategory,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDishRequest {
    pub name: String,
    pub category: DishCategory,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDishRequest {
    pub name: Option<String>,
    pub category: Option<DishCategory>,
    pub image_url: Option<String>,
}
