use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        availability::{Slot, SlotKey},
        order::{NewOrder, Order, OrderStatus},
    },
};

const SLOT_COLUMNS: &str =
    "id, chef_id, date, time_slot, is_active, is_booked, share_token, created_at";

const ORDER_COLUMNS: &str = "id, booking_code, customer_name, customer_phone, chef_id, \
     availability_id, menu_id, status, service_address, notes, guest_count, created_at, updated_at";

/// Persistence boundary of the availability and booking state machine.
///
/// Every mutating method is a single guarded statement so that the store,
/// not the caller, serializes competing writers on the same slot row.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_slot(&self, key: SlotKey) -> AppResult<Option<Slot>>;

    /// Slots of one chef with `from <= date <= to`.
    async fn find_slots(&self, chef_id: Uuid, from: NaiveDate, to: NaiveDate)
        -> AppResult<Vec<Slot>>;

    /// Create the row with `is_active` or flip `is_active` on the existing one.
    /// Returns `None` when the existing row is booked; it is left untouched.
    async fn upsert_slot_active(
        &self,
        key: SlotKey,
        is_active: bool,
        share_token: &str,
    ) -> AppResult<Option<Slot>>;

    /// Return the slot row, creating it open and unbooked if absent.
    /// Concurrent callers converge on the same row.
    async fn ensure_slot(&self, key: SlotKey, share_token: &str) -> AppResult<Slot>;

    /// Flip `is_booked` on an open, unbooked slot. `false` means the guard
    /// failed: someone booked or closed it first.
    async fn claim_slot(&self, slot_id: Uuid) -> AppResult<bool>;

    async fn insert_order(&self, order: &NewOrder) -> AppResult<Order>;

    /// Remove an order this process inserted but could not back with a slot.
    async fn discard_order(&self, order_id: Uuid) -> AppResult<()>;

    async fn find_order(&self, chef_id: Uuid, order_id: Uuid) -> AppResult<Option<Order>>;

    /// Move an order from `from` to `to`. `None` if it is no longer in `from`.
    async fn update_order_status(
        &self,
        chef_id: Uuid,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>>;

    /// Whether the chef exists and currently accepts bookings.
    async fn chef_accepts_bookings(&self, chef_id: Uuid) -> AppResult<bool>;

    async fn menu_belongs_to(&self, chef_id: Uuid, menu_id: Uuid) -> AppResult<bool>;
}

#[async_trait]
impl BookingStore for PgPool {
    async fn find_slot(&self, key: SlotKey) -> AppResult<Option<Slot>> {
        let slot = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM availability
             WHERE chef_id = $1 AND date = $2 AND time_slot = $3"
        ))
        .bind(key.chef_id)
        .bind(key.date)
        .bind(key.time_slot.as_str())
        .fetch_optional(self)
        .await?;
        Ok(slot)
    }

    async fn find_slots(
        &self,
        chef_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Slot>> {
        let slots = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM availability
             WHERE chef_id = $1 AND date BETWEEN $2 AND $3
             ORDER BY date, time_slot DESC"
        ))
        .bind(chef_id)
        .bind(from)
        .bind(to)
        .fetch_all(self)
        .await?;
        Ok(slots)
    }

    async fn upsert_slot_active(
        &self,
        key: SlotKey,
        is_active: bool,
        share_token: &str,
    ) -> AppResult<Option<Slot>> {
        let slot = sqlx::query_as::<_, Slot>(&format!(
            "INSERT INTO availability (chef_id, date, time_slot, is_active, is_booked, share_token)
             VALUES ($1, $2, $3, $4, FALSE, $5)
             ON CONFLICT (chef_id, date, time_slot) DO UPDATE SET
                 is_active = EXCLUDED.is_active
             WHERE availability.is_booked = FALSE
             RETURNING {SLOT_COLUMNS}"
        ))
        .bind(key.chef_id)
        .bind(key.date)
        .bind(key.time_slot.as_str())
        .bind(is_active)
        .bind(share_token)
        .fetch_optional(self)
        .await?;
        Ok(slot)
    }

    async fn ensure_slot(&self, key: SlotKey, share_token: &str) -> AppResult<Slot> {
        sqlx::query(
            "INSERT INTO availability (chef_id, date, time_slot, is_active, is_booked, share_token)
             VALUES ($1, $2, $3, TRUE, FALSE, $4)
             ON CONFLICT (chef_id, date, time_slot) DO NOTHING",
        )
        .bind(key.chef_id)
        .bind(key.date)
        .bind(key.time_slot.as_str())
        .bind(share_token)
        .execute(self)
        .await?;

        // Separate statement so a row committed by a concurrent creator is visible.
        let slot = sqlx::query_as::<_, Slot>(&format!(
            "SELECT {SLOT_COLUMNS} FROM availability
             WHERE chef_id = $1 AND date = $2 AND time_slot = $3"
        ))
        .bind(key.chef_id)
        .bind(key.date)
        .bind(key.time_slot.as_str())
        .fetch_one(self)
        .await?;
        Ok(slot)
    }

    async fn claim_slot(&self, slot_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE availability SET is_booked = TRUE
             WHERE id = $1 AND is_booked = FALSE AND is_active = TRUE",
        )
        .bind(slot_id)
        .execute(self)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn insert_order(&self, order: &NewOrder) -> AppResult<Order> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders
                (booking_code, customer_name, customer_phone, chef_id, availability_id,
                 menu_id, status, service_address, notes, guest_count)
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8, $9)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&order.booking_code)
        .bind(&order.customer_name)
        .bind(&order.customer_phone)
        .bind(order.chef_id)
        .bind(order.availability_id)
        .bind(order.menu_id)
        .bind(&order.service_address)
        .bind(&order.notes)
        .bind(order.guest_count)
        .fetch_one(self)
        .await?;
        Ok(order)
    }

    async fn discard_order(&self, order_id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM orders WHERE id = $1 AND status = 'pending'")
            .bind(order_id)
            .execute(self)
            .await?;
        Ok(())
    }

    async fn find_order(&self, chef_id: Uuid, order_id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND chef_id = $2"
        ))
        .bind(order_id)
        .bind(chef_id)
        .fetch_optional(self)
        .await?;
        Ok(order)
    }

    async fn update_order_status(
        &self,
        chef_id: Uuid,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $1, updated_at = NOW()
             WHERE id = $2 AND chef_id = $3 AND status = $4
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(to.as_str())
        .bind(order_id)
        .bind(chef_id)
        .bind(from.as_str())
        .fetch_optional(self)
        .await?;
        Ok(order)
    }

    async fn chef_accepts_bookings(&self, chef_id: Uuid) -> AppResult<bool> {
        let active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM chefs WHERE id = $1")
                .bind(chef_id)
                .fetch_optional(self)
                .await?;
        Ok(active.unwrap_or(false))
    }

    async fn menu_belongs_to(&self, chef_id: Uuid, menu_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM menus WHERE id = $1 AND chef_id = $2)",
        )
        .bind(menu_id)
        .bind(chef_id)
        .fetch_one(self)
        .await?;
        Ok(exists)
    }
}
