use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        auth::ChefId,
        chef::{Chef, PublicChef, UpsertChefProfileRequest},
    },
};

pub struct ChefService;

impl ChefService {
    pub async fn get_profile(pool: &PgPool, chef: ChefId) -> AppResult<Chef> {
        sqlx::query_as::<_, Chef>("SELECT * FROM chefs WHERE id = $1")
            .bind(chef.0)
            .fetch_optional(pool)
            .await?
            .ok_or(AppError::NotFound("Chef profile"))
    }

    /// Create the profile on first save, update it afterwards.
    pub async fn upsert_profile(
        pool: &PgPool,
        chef: ChefId,
        req: &UpsertChefProfileRequest,
    ) -> AppResult<Chef> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name is required"));
        }

        let profile = sqlx::query_as::<_, Chef>(
            "INSERT INTO chefs (id, name, bio, phone, address, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, TRUE))
             ON CONFLICT (id) DO UPDATE SET
                 name = EXCLUDED.name,
                 bio = EXCLUDED.bio,
                 phone = EXCLUDED.phone,
                 address = EXCLUDED.address,
                 is_active = COALESCE($6, chefs.is_active),
                 updated_at = NOW()
             RETURNING *",
        )
        .bind(chef.0)
        .bind(name)
        .bind(req.bio.trim())
        .bind(req.phone.trim())
        .bind(req.address.trim())
        .bind(req.is_active)
        .fetch_one(pool)
        .await?;
        Ok(profile)
    }

    /// Profile shown on the share page; inactive chefs are hidden.
    pub async fn public_profile(pool: &PgPool, chef_id: Uuid) -> AppResult<PublicChef> {
        sqlx::query_as::<_, PublicChef>(
            "SELECT id, name, bio, phone, address FROM chefs
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(chef_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Chef"))
    }
}
