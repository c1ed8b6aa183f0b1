use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::require_chef,
    models::{
        auth::AuthenticatedUser,
        order::{ChangeStatusRequest, Order, OrderDetail, OrderListQuery},
    },
    services::orders::OrderService,
    AppState,
};

pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let chef = require_chef(&user)?;
    OrderService::list(&state.db, chef, query.status).await.map(Json)
}

pub async fn get_order(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrderDetail>> {
    let chef = require_chef(&user)?;
    OrderService::get(&state.db, chef, id).await.map(Json)
}

pub async fn change_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ChangeStatusRequest>,
) -> AppResult<Json<Order>> {
    let chef = require_chef(&user)?;
    OrderService::change_status(&state.db, chef, id, body.status)
        .await
        .map(Json)
}
