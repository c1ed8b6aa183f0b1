//! Public pages reached through a chef's share link. No authentication.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        auth::ChefId,
        availability::{MonthQuery, SlotView},
        chef::PublicChef,
        menu::MenuWithItems,
        order::{BookingReceipt, BookingRequest},
    },
    services::{
        availability::{parse_month, AvailabilityService},
        booking::BookingService,
        chefs::ChefService,
        menu::MenuService,
    },
    AppState,
};

#[derive(Debug, Serialize)]
pub struct SharePage {
    pub chef: PublicChef,
    pub menus: Vec<MenuWithItems>,
}

pub async fn get_share_page(
    State(state): State<AppState>,
    Path(chef_id): Path<Uuid>,
) -> AppResult<Json<SharePage>> {
    let chef = ChefService::public_profile(&state.db, chef_id).await?;
    let menus = MenuService::list(&state.db, chef_id).await?;
    Ok(Json(SharePage { chef, menus }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Path(chef_id): Path<Uuid>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<SlotView>>> {
    let month_start = parse_month(&query.month)?;
    AvailabilityService::month(
        &state.db,
        ChefId(chef_id),
        month_start,
        state.config.today(),
        state.config.booking_window_months,
    )
    .await
    .map(Json)
}

pub async fn create_booking(
    State(state): State<AppState>,
    Path(chef_id): Path<Uuid>,
    Json(body): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<BookingReceipt>)> {
    let order =
        BookingService::submit(&state.db, ChefId(chef_id), &body, state.booking_context()).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingReceipt { booking_code: order.booking_code.clone(), order }),
    ))
}
