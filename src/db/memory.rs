//! In-process `BookingStore` used by the state machine tests.
//!
//! Each method yields before touching state, so futures driven together with
//! `tokio::join!` interleave at every store call like separate requests would.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::store::BookingStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        availability::{Slot, SlotKey},
        order::{NewOrder, Order, OrderStatus},
    },
};

#[derive(Default)]
struct State {
    slots: HashMap<SlotKey, Slot>,
    orders: Vec<Order>,
    active_chefs: HashSet<Uuid>,
    menus: HashSet<(Uuid, Uuid)>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// A store with one active chef owning one menu.
    pub fn with_chef(chef_id: Uuid, menu_id: Uuid) -> Self {
        let mut state = State::default();
        state.active_chefs.insert(chef_id);
        state.menus.insert((chef_id, menu_id));
        Self { state: Mutex::new(state) }
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.lock().await.orders.clone()
    }

    pub async fn slot(&self, key: SlotKey) -> Option<Slot> {
        self.state.lock().await.slots.get(&key).cloned()
    }

    /// Write a row directly, bypassing every guard.
    pub async fn put_slot(&self, key: SlotKey, is_active: bool, is_booked: bool) -> Slot {
        let slot = new_slot(key, is_active, "seeded");
        let slot = Slot { is_booked, ..slot };
        self.state.lock().await.slots.insert(key, slot.clone());
        slot
    }
}

fn new_slot(key: SlotKey, is_active: bool, share_token: &str) -> Slot {
    Slot {
        id: Uuid::new_v4(),
        chef_id: key.chef_id,
        date: key.date,
        time_slot: key.time_slot,
        is_active,
        is_booked: false,
        share_token: share_token.to_string(),
        created_at: Utc::now(),
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_slot(&self, key: SlotKey) -> AppResult<Option<Slot>> {
        tokio::task::yield_now().await;
        Ok(self.state.lock().await.slots.get(&key).cloned())
    }

    async fn find_slots(
        &self,
        chef_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<Slot>> {
        tokio::task::yield_now().await;
        let state = self.state.lock().await;
        let mut slots: Vec<Slot> = state
            .slots
            .values()
            .filter(|s| s.chef_id == chef_id && s.date >= from && s.date <= to)
            .cloned()
            .collect();
        slots.sort_by_key(|s| (s.date, s.time_slot.as_str()));
        Ok(slots)
    }

    async fn upsert_slot_active(
        &self,
        key: SlotKey,
        is_active: bool,
        share_token: &str,
    ) -> AppResult<Option<Slot>> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().await;
        let slot = state
            .slots
            .entry(key)
            .or_insert_with(|| new_slot(key, is_active, share_token));
        if slot.is_booked {
            return Ok(None);
        }
        slot.is_active = is_active;
        Ok(Some(slot.clone()))
    }

    async fn ensure_slot(&self, key: SlotKey, share_token: &str) -> AppResult<Slot> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().await;
        let slot = state
            .slots
            .entry(key)
            .or_insert_with(|| new_slot(key, true, share_token));
        Ok(slot.clone())
    }

    async fn claim_slot(&self, slot_id: Uuid) -> AppResult<bool> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().await;
        match state.slots.values_mut().find(|s| s.id == slot_id) {
            Some(slot) if slot.is_active && !slot.is_booked => {
                slot.is_booked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_order(&self, order: &NewOrder) -> AppResult<Order> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().await;
        if state.orders.iter().any(|o| o.booking_code == order.booking_code) {
            return Err(AppError::Conflict("Record already exists".into()));
        }
        let now = Utc::now();
        let row = Order {
            id: Uuid::new_v4(),
            booking_code: order.booking_code.clone(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            chef_id: order.chef_id,
            availability_id: order.availability_id,
            menu_id: order.menu_id,
            status: OrderStatus::Pending,
            service_address: order.service_address.clone(),
            notes: order.notes.clone(),
            guest_count: order.guest_count,
            created_at: now,
            updated_at: now,
        };
        state.orders.push(row.clone());
        Ok(row)
    }

    async fn discard_order(&self, order_id: Uuid) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.state
            .lock()
            .await
            .orders
            .retain(|o| !(o.id == order_id && o.status == OrderStatus::Pending));
        Ok(())
    }

    async fn find_order(&self, chef_id: Uuid, order_id: Uuid) -> AppResult<Option<Order>> {
        tokio::task::yield_now().await;
        let state = self.state.lock().await;
        Ok(state
            .orders
            .iter()
            .find(|o| o.id == order_id && o.chef_id == chef_id)
            .cloned())
    }

    async fn update_order_status(
        &self,
        chef_id: Uuid,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        tokio::task::yield_now().await;
        let mut state = self.state.lock().await;
        match state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id && o.chef_id == chef_id && o.status == from)
        {
            Some(order) => {
                order.status = to;
                order.updated_at = Utc::now();
                Ok(Some(order.clone()))
            }
            None => Ok(None),
        }
    }

    async fn chef_accepts_bookings(&self, chef_id: Uuid) -> AppResult<bool> {
        Ok(self.state.lock().await.active_chefs.contains(&chef_id))
    }

    async fn menu_belongs_to(&self, chef_id: Uuid, menu_id: Uuid) -> AppResult<bool> {
        Ok(self.state.lock().await.menus.contains(&(chef_id, menu_id)))
    }
}
