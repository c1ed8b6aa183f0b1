use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    middleware::auth::require_chef,
    models::{
        auth::AuthenticatedUser,
        availability::{Slot, SlotView, ToggleSlotRequest, WeekQuery},
    },
    services::availability::AvailabilityService,
    AppState,
};

pub async fn get_week(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<Vec<SlotView>>> {
    let chef = require_chef(&user)?;
    AvailabilityService::week(&state.db, chef, query.week_start, state.config.today())
        .await
        .map(Json)
}

pub async fn toggle_slot(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<ToggleSlotRequest>,
) -> AppResult<Json<Slot>> {
    let chef = require_chef(&user)?;
    AvailabilityService::toggle(
        &state.db,
        chef,
        body.date,
        body.time_slot,
        body.is_active,
        state.config.today(),
    )
    .await
    .map(Json)
}
