use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult, models::order::BookingLookup, services::orders::OrderService, AppState,
};

/// GET /bookings/{booking_code}: lets a customer check their booking.
pub async fn lookup_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Json<BookingLookup>> {
    OrderService::lookup_by_code(&state.db, &code).await.map(Json)
}
