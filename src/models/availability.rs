use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

text_enum! {
    /// Lunch/dinner partition of a calendar date.
    TimeSlot as "time slot" {
        Lunch => "lunch",
        Dinner => "dinner",
    }
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 2] = [TimeSlot::Lunch, TimeSlot::Dinner];
}

text_enum! {
    /// Display status of a (date, time slot) cell, shared by every calendar view.
    SlotStatus as "slot status" {
        Available => "available",
        Booked => "booked",
        Closed => "closed",
        Past => "past",
    }
}

/// One `availability` row. Rows only exist once a chef toggled the cell
/// or a customer booked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Slot {
    pub id: Uuid,
    pub chef_id: Uuid,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub time_slot: TimeSlot,
    pub is_active: bool,
    pub is_booked: bool,
    #[serde(skip_serializing)]
    pub share_token: String,
    pub created_at: DateTime<Utc>,
}

/// Natural key of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub chef_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
}

/// One cell of a calendar response.
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_id: Option<Uuid>,
}

/// Body for PUT /chef/schedule.
#[derive(Debug, Deserialize)]
pub struct ToggleSlotRequest {
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub is_active: bool,
}

/// Query params for GET /chef/schedule.
#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    /// First day of the week to show (ISO 8601 date, e.g. "2025-06-02").
    pub week_start: NaiveDate,
}

/// Query params for GET /share/{chef_id}/calendar.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// Month in `YYYY-MM` form.
    pub month: String,
}
