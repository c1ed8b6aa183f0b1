use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::require_chef,
    models::{
        auth::AuthenticatedUser,
        dish::{CreateDishRequest, Dish, UpdateDishRequest},
    },
    services::dishes::DishService,
    AppState,
};

pub async fn list_dishes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<Dish>>> {
    let chef = require_chef(&user)?;
    DishService::list(&state.db, chef).await.map(Json)
}

pub async fn create_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateDishRequest>,
) -> AppResult<(StatusCode, Json<Dish>)> {
    let chef = require_chef(&user)?;
    let dish = DishService::create(&state.db, chef, &body).await?;
    Ok((StatusCode::CREATED, Json(dish)))
}

pub async fn update_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDishRequest>,
) -> AppResult<Json<Dish>> {
    let chef = require_chef(&user)?;
    DishService::update(&state.db, chef, id, &body).await.map(Json)
}

pub async fn delete_dish(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let chef = require_chef(&user)?;
    DishService::delete(&state.db, chef, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
