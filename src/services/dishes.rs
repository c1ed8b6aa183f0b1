use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        auth::ChefId,
        dish::{CreateDishRequest, Dish, UpdateDishRequest},
    },
};

const DISH_COLUMNS: &str = "id, chef_id, name, category, image_url, created_at";

pub struct DishService;

impl DishService {
    pub async fn list(pool: &PgPool, chef: ChefId) -> AppResult<Vec<Dish>> {
        let dishes = sqlx::query_as::<_, Dish>(&format!(
            "SELECT {DISH_COLUMNS} FROM dishes WHERE chef_id = $1 ORDER BY category, name"
        ))
        .bind(chef.0)
        .fetch_all(pool)
        .await?;
        Ok(dishes)
    }

    pub async fn create(pool: &PgPool, chef: ChefId, req: &CreateDishRequest) -> AppResult<Dish> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name is required"));
        }
        let dish = sqlx::query_as::<_, Dish>(&format!(
            "INSERT INTO dishes (chef_id, name, category, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {DISH_COLUMNS}"
        ))
        .bind(chef.0)
        .bind(name)
        .bind(req.category.as_str())
        .bind(&req.image_url)
        .fetch_one(pool)
        .await?;
        Ok(dish)
    }

    /// Updates only dishes owned by `chef`; anything else is reported as missing.
    pub async fn update(
        pool: &PgPool,
        chef: ChefId,
        id: Uuid,
        req: &UpdateDishRequest,
    ) -> AppResult<Dish> {
        let name = req.name.as_deref().map(str::trim);
        if name == Some("") {
            return Err(AppError::validation("name cannot be empty"));
        }
        sqlx::query_as::<_, Dish>(&format!(
            "UPDATE dishes
             SET name = COALESCE($1, name),
                 category = COALESCE($2, category),
                 image_url = COALESCE($3, image_url)
             WHERE id = $4 AND chef_id = $5
             RETURNING {DISH_COLUMNS}"
        ))
        .bind(name)
        .bind(req.category.map(|c| c.as_str()))
        .bind(&req.image_url)
        .bind(id)
        .bind(chef.0)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Dish"))
    }

    pub async fn delete(pool: &PgPool, chef: ChefId, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM dishes WHERE id = $1 AND chef_id = $2")
            .bind(id)
            .bind(chef.0)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Dish"));
        }
        Ok(())
    }
}
