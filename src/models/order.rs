use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::availability::TimeSlot;

text_enum! {
    OrderStatus as "order status" {
        Pending => "pending",
        Accepted => "accepted",
        Completed => "completed",
        Rejected => "rejected",
        Cancelled => "cancelled",
    }
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Rejected | OrderStatus::Cancelled
        )
    }

    /// Chef-triggered lifecycle: pending → accepted → completed,
    /// pending → rejected, and cancellation from any non-terminal state.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Accepted, Completed)
                | (Pending, Cancelled)
                | (Accepted, Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub booking_code: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub chef_id: Uuid,
    pub availability_id: Uuid,
    pub menu_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub service_address: String,
    pub notes: Option<String>,
    pub guest_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row to insert once the slot has been verified bookable.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub booking_code: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub chef_id: Uuid,
    pub availability_id: Uuid,
    pub menu_id: Uuid,
    pub service_address: String,
    pub notes: Option<String>,
    pub guest_count: i32,
}

/// Body for POST /share/{chef_id}/bookings.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub service_address: String,
    pub notes: Option<String>,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub menu_id: Uuid,
    pub guest_count: i32,
}

#[derive(Debug, Serialize)]
pub struct BookingReceipt {
    pub booking_code: String,
    pub order: Order,
}

/// Order joined with its slot and menu, for detail screens.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub time_slot: TimeSlot,
    pub menu_name: String,
    pub price_cents: i64,
}

/// What a customer sees when looking an order up by booking code.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingLookup {
    pub booking_code: String,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub time_slot: TimeSlot,
    pub menu_name: String,
    pub guest_count: i32,
    pub chef_name: String,
    pub created_at: DateTime<Utc>,
}

/// Body for PUT /orders/{id}/status.
#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: OrderStatus,
}

/// Query params for GET /orders.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentOrder {
    pub id: Uuid,
    pub booking_code: String,
    pub customer_name: String,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub completed_orders: i64,
    pub total_revenue_cents: i64,
    pub recent_orders: Vec<RecentOrder>,
}
