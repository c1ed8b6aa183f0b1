use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    middleware::auth::require_chef,
    models::{
        auth::AuthenticatedUser,
        chef::{Chef, ShareLink, UpsertChefProfileRequest},
        order::DashboardStats,
    },
    services::{chefs::ChefService, orders::OrderService},
    AppState,
};

pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Chef>> {
    let chef = require_chef(&user)?;
    ChefService::get_profile(&state.db, chef).await.map(Json)
}

pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<UpsertChefProfileRequest>,
) -> AppResult<Json<Chef>> {
    let chef = require_chef(&user)?;
    ChefService::upsert_profile(&state.db, chef, &body).await.map(Json)
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let chef = require_chef(&user)?;
    OrderService::dashboard(&state.db, chef).await.map(Json)
}

/// The public page customers book from.
pub async fn share_link(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ShareLink>> {
    let chef = require_chef(&user)?;
    Ok(Json(ShareLink {
        url: format!("{}/share/{}", state.config.app_base_url, chef.0),
    }))
}
