use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::store::BookingStore,
    error::{AppError, AppResult},
    models::{
        auth::ChefId,
        order::{BookingLookup, DashboardStats, Order, OrderDetail, OrderStatus, RecentOrder},
    },
    services::{booking_code, metrics::ORDER_TRANSITIONS_COUNTER},
};

const DETAIL_SELECT: &str = "SELECT o.id, o.booking_code, o.customer_name, o.customer_phone, o.chef_id,
            o.availability_id, o.menu_id, o.status, o.service_address, o.notes,
            o.guest_count, o.created_at, o.updated_at,
            a.date, a.time_slot, m.name AS menu_name, m.price_cents
     FROM orders o
     JOIN availability a ON a.id = o.availability_id
     JOIN menus m ON m.id = o.menu_id";

pub struct OrderService;

impl OrderService {
    /// Chef-triggered status change. The slot is left alone: a booked slot
    /// stays booked whatever happens to its order.
    pub async fn change_status<S: BookingStore + ?Sized>(
        store: &S,
        chef: ChefId,
        order_id: Uuid,
        next: OrderStatus,
    ) -> AppResult<Order> {
        let current = store
            .find_order(chef.0, order_id)
            .await?
            .ok_or(AppError::NotFound("Order"))?;

        if current.status == next {
            return Ok(current);
        }
        if !current.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition(format!(
                "order cannot move from {} to {}",
                current.status, next
            )));
        }

        // Guarded on the status we just read, so two racing changes cannot
        // both apply.
        let updated = store
            .update_order_status(chef.0, order_id, current.status, next)
            .await?
            .ok_or_else(|| {
                AppError::InvalidTransition("order status changed concurrently, reload".into())
            })?;

        ORDER_TRANSITIONS_COUNTER
            .with_label_values(&[next.as_str()])
            .inc();
        info!(
            chef_id = %chef.0,
            order_id = %order_id,
            from = %current.status,
            to = %next,
            "order status changed"
        );
        Ok(updated)
    }

    /// Orders of one chef, newest first.
    pub async fn list(
        pool: &PgPool,
        chef: ChefId,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<OrderDetail>> {
        let orders = sqlx::query_as::<_, OrderDetail>(&format!(
            "{DETAIL_SELECT}
             WHERE o.chef_id = $1 AND ($2::TEXT IS NULL OR o.status = $2)
             ORDER BY o.created_at DESC"
        ))
        .bind(chef.0)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await?;
        Ok(orders)
    }

    pub async fn get(pool: &PgPool, chef: ChefId, order_id: Uuid) -> AppResult<OrderDetail> {
        sqlx::query_as::<_, OrderDetail>(&format!(
            "{DETAIL_SELECT} WHERE o.id = $1 AND o.chef_id = $2"
        ))
        .bind(order_id)
        .bind(chef.0)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Order"))
    }

    /// Public lookup by the code handed to the customer.
    pub async fn lookup_by_code(pool: &PgPool, code: &str) -> AppResult<BookingLookup> {
        if !booking_code::is_well_formed(code) {
            return Err(AppError::NotFound("Booking"));
        }
        sqlx::query_as::<_, BookingLookup>(
            "SELECT o.booking_code, o.status, a.date, a.time_slot, m.name AS menu_name,
                    o.guest_count, c.name AS chef_name, o.created_at
             FROM orders o
             JOIN availability a ON a.id = o.availability_id
             JOIN menus m ON m.id = o.menu_id
             JOIN chefs c ON c.id = o.chef_id
             WHERE o.booking_code = $1",
        )
        .bind(code)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("Booking"))
    }

    /// Counters for the chef's own dashboard.
    pub async fn dashboard(pool: &PgPool, chef: ChefId) -> AppResult<DashboardStats> {
        let (total_orders, pending_orders, completed_orders, total_revenue_cents): (i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT COUNT(*)::BIGINT,
                        COUNT(*) FILTER (WHERE o.status = 'pending')::BIGINT,
                        COUNT(*) FILTER (WHERE o.status = 'completed')::BIGINT,
                        COALESCE(SUM(m.price_cents) FILTER (WHERE o.status = 'completed'), 0)::BIGINT
                 FROM orders o
                 JOIN menus m ON m.id = o.menu_id
                 WHERE o.chef_id = $1",
            )
            .bind(chef.0)
            .fetch_one(pool)
            .await?;

        let recent_orders = sqlx::query_as::<_, RecentOrder>(
            "SELECT id, booking_code, customer_name, status, created_at
             FROM orders WHERE chef_id = $1
             ORDER BY created_at DESC LIMIT 5",
        )
        .bind(chef.0)
        .fetch_all(pool)
        .await?;

        Ok(DashboardStats {
            total_orders,
            pending_orders,
            completed_orders,
            total_revenue_cents,
            recent_orders,
        })
    }
}
