use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    db::store::BookingStore,
    error::{AppError, AppResult},
    models::{
        auth::ChefId,
        availability::{SlotKey, SlotStatus},
        order::{BookingRequest, NewOrder, Order},
    },
    services::{
        availability::{booking_window_end, derive_status, new_share_token},
        booking_code,
        metrics::BOOKINGS_COUNTER,
    },
};

/// Limits a booking submission is checked against.
#[derive(Debug, Clone, Copy)]
pub struct BookingContext {
    pub today: NaiveDate,
    pub window_months: u32,
}

pub struct BookingService;

impl BookingService {
    /// Turn a customer's selection into a pending order on a booked slot.
    ///
    /// Availability is re-derived from freshly read rows, never from what the
    /// customer saw. The order is inserted before the slot is claimed; the
    /// claim is a conditional update on `is_booked = false`, and a submission
    /// that loses it removes its own order and reports `SlotNoLongerAvailable`.
    pub async fn submit<S: BookingStore + ?Sized>(
        store: &S,
        chef: ChefId,
        req: &BookingRequest,
        ctx: BookingContext,
    ) -> AppResult<Order> {
        let outcome = Self::try_submit(store, chef, req, ctx).await;
        let label = match &outcome {
            Ok(_) => "booked",
            Err(AppError::SlotNoLongerAvailable) => "slot_taken",
            Err(AppError::Validation(_)) | Err(AppError::NotFound(_)) => "rejected",
            Err(_) => "error",
        };
        BOOKINGS_COUNTER.with_label_values(&[label]).inc();
        outcome
    }

    async fn try_submit<S: BookingStore + ?Sized>(
        store: &S,
        chef: ChefId,
        req: &BookingRequest,
        ctx: BookingContext,
    ) -> AppResult<Order> {
        let details = validate(req, ctx)?;

        if !store.chef_accepts_bookings(chef.0).await? {
            return Err(AppError::NotFound("Chef"));
        }
        if !store.menu_belongs_to(chef.0, req.menu_id).await? {
            return Err(AppError::validation("menu does not belong to this chef"));
        }

        let key = SlotKey { chef_id: chef.0, date: req.date, time_slot: req.time_slot };

        let current = store.find_slot(key).await?;
        if derive_status(current.as_ref(), req.date, req.time_slot, ctx.today) != SlotStatus::Available {
            return Err(AppError::SlotNoLongerAvailable);
        }

        let slot = match current {
            Some(slot) => slot,
            None => store.ensure_slot(key, &new_share_token()).await?,
        };
        // A concurrent writer may have created or changed the row in between.
        if derive_status(Some(&slot), req.date, req.time_slot, ctx.today) != SlotStatus::Available {
            return Err(AppError::SlotNoLongerAvailable);
        }

        let order = store
            .insert_order(&NewOrder {
                booking_code: booking_code::generate(),
                customer_name: details.customer_name,
                customer_phone: details.customer_phone,
                chef_id: chef.0,
                availability_id: slot.id,
                menu_id: req.menu_id,
                service_address: details.service_address,
                notes: details.notes,
                guest_count: req.guest_count,
            })
            .await?;

        match store.claim_slot(slot.id).await {
            Ok(true) => {
                info!(
                    chef_id = %chef.0,
                    slot_id = %slot.id,
                    booking_code = %order.booking_code,
                    "booking accepted"
                );
                Ok(order)
            }
            Ok(false) => {
                warn!(
                    slot_id = %slot.id,
                    booking_code = %order.booking_code,
                    "slot taken by a concurrent booking, discarding order"
                );
                store.discard_order(order.id).await?;
                Err(AppError::SlotNoLongerAvailable)
            }
            Err(e) => {
                // The order stays and references a slot not yet marked booked;
                // reconciliation marks it later. Never the other way round.
                warn!(
                    slot_id = %slot.id,
                    order_id = %order.id,
                    error = %e,
                    "order stored but slot claim failed"
                );
                Err(e)
            }
        }
    }
}

struct ContactDetails {
    customer_name: String,
    customer_phone: String,
    service_address: String,
    notes: Option<String>,
}

fn validate(req: &BookingRequest, ctx: BookingContext) -> AppResult<ContactDetails> {
    let customer_name = req.customer_name.trim();
    let customer_phone = req.customer_phone.trim();
    let service_address = req.service_address.trim();

    if customer_name.is_empty() {
        return Err(AppError::validation("customer_name is required"));
    }
    if customer_phone.is_empty() {
        return Err(AppError::validation("customer_phone is required"));
    }
    if service_address.is_empty() {
        return Err(AppError::validation("service_address is required"));
    }
    if req.guest_count < 1 {
        return Err(AppError::validation("guest_count must be at least 1"));
    }
    let window_end = booking_window_end(ctx.today, ctx.window_months);
    if req.date > window_end {
        return Err(AppError::validation(format!(
            "bookings are only accepted up to {window_end}"
        )));
    }

    Ok(ContactDetails {
        customer_name: customer_name.to_string(),
        customer_phone: customer_phone.to_string(),
        service_address: service_address.to_string(),
        notes: req
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    })
}
