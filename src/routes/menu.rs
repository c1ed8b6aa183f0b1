use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::require_chef,
    models::{
        auth::AuthenticatedUser,
        menu::{
            AddMenuItemRequest, CreateMenuRequest, ImportItemsRequest, Menu, MenuItem,
            MenuWithItems, UpdateMenuRequest,
        },
    },
    services::menu::MenuService,
    AppState,
};

pub async fn list_menus(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<Vec<MenuWithItems>>> {
    let chef = require_chef(&user)?;
    MenuService::list(&state.db, chef.0).await.map(Json)
}

pub async fn create_menu(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateMenuRequest>,
) -> AppResult<(StatusCode, Json<Menu>)> {
    let chef = require_chef(&user)?;
    let menu = MenuService::create(&state.db, chef, &body).await?;
    Ok((StatusCode::CREATED, Json(menu)))
}

pub async fn update_menu(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMenuRequest>,
) -> AppResult<Json<Menu>> {
    let chef = require_chef(&user)?;
    MenuService::update(&state.db, chef, id, &body).await.map(Json)
}

pub async fn delete_menu(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let chef = require_chef(&user)?;
    MenuService::delete(&state.db, chef, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(menu_id): Path<Uuid>,
    Json(body): Json<AddMenuItemRequest>,
) -> AppResult<Json<MenuItem>> {
    let chef = require_chef(&user)?;
    MenuService::add_item(&state.db, chef, menu_id, body.dish_id)
        .await
        .map(Json)
}

pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path((menu_id, item_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let chef = require_chef(&user)?;
    MenuService::remove_item(&state.db, chef, menu_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn duplicate_menu(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<Menu>)> {
    let chef = require_chef(&user)?;
    let copy = MenuService::duplicate(&state.db, chef, id).await?;
    Ok((StatusCode::CREATED, Json(copy)))
}

pub async fn import_items(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(menu_id): Path<Uuid>,
    Json(body): Json<ImportItemsRequest>,
) -> AppResult<Json<Value>> {
    let chef = require_chef(&user)?;
    let imported = MenuService::import_items(&state.db, chef, menu_id, body.source_menu_id).await?;
    Ok(Json(json!({ "imported": imported })))
}
