use chrono::{Datelike, Duration, Months, NaiveDate};
use rand::{distributions::Alphanumeric, Rng};
use tracing::info;

use crate::{
    db::store::BookingStore,
    error::{AppError, AppResult},
    models::{
        auth::ChefId,
        availability::{Slot, SlotKey, SlotStatus, SlotView, TimeSlot},
    },
    services::metrics::SLOT_TOGGLES_COUNTER,
};

/// Status of one (date, time slot) cell. First matching rule wins:
/// past date, no row (open by default), booked, active, otherwise closed.
///
/// Every view of a chef's calendar goes through this function, so the chef
/// and the customer can never disagree on whether a cell is bookable.
pub fn derive_status(
    slot: Option<&Slot>,
    date: NaiveDate,
    time_slot: TimeSlot,
    today: NaiveDate,
) -> SlotStatus {
    debug_assert!(slot.map_or(true, |s| s.date == date && s.time_slot == time_slot));

    if date < today {
        return SlotStatus::Past;
    }
    match slot {
        None => SlotStatus::Available,
        Some(s) if s.is_booked => SlotStatus::Booked,
        Some(s) if s.is_active => SlotStatus::Available,
        Some(_) => SlotStatus::Closed,
    }
}

/// Cells for every date in `from..=to`, lunch before dinner.
pub fn build_views(slots: &[Slot], from: NaiveDate, to: NaiveDate, today: NaiveDate) -> Vec<SlotView> {
    from.iter_days()
        .take_while(|d| *d <= to)
        .flat_map(|date| TimeSlot::ALL.into_iter().map(move |ts| (date, ts)))
        .map(|(date, time_slot)| {
            let slot = slots
                .iter()
                .find(|s| s.date == date && s.time_slot == time_slot);
            SlotView {
                date,
                time_slot,
                status: derive_status(slot, date, time_slot, today),
                slot_id: slot.map(|s| s.id),
            }
        })
        .collect()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last date customers may book: end of the `window_months`-th month,
/// counting the month of `today` as the first.
pub fn booking_window_end(today: NaiveDate, window_months: u32) -> NaiveDate {
    first_of_month(today)
        .checked_add_months(Months::new(window_months))
        .map(|d| d - Duration::days(1))
        .unwrap_or(NaiveDate::MAX)
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(month: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::validation("month must be formatted as YYYY-MM"))
}

pub(crate) fn new_share_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

pub struct AvailabilityService;

impl AvailabilityService {
    /// Chef calendar: seven days starting at `week_start`.
    pub async fn week<S: BookingStore + ?Sized>(
        store: &S,
        chef: ChefId,
        week_start: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<Vec<SlotView>> {
        let week_end = week_start
            .checked_add_signed(Duration::days(6))
            .ok_or_else(|| AppError::validation("week_start is out of range"))?;
        let slots = store.find_slots(chef.0, week_start, week_end).await?;
        Ok(build_views(&slots, week_start, week_end, today))
    }

    /// Share-page calendar for one month inside the booking window.
    pub async fn month<S: BookingStore + ?Sized>(
        store: &S,
        chef: ChefId,
        month_start: NaiveDate,
        today: NaiveDate,
        window_months: u32,
    ) -> AppResult<Vec<SlotView>> {
        let month_start = first_of_month(month_start);
        let window_end = booking_window_end(today, window_months);
        if month_start < first_of_month(today) || month_start > window_end {
            return Err(AppError::validation(format!(
                "month must be between {} and {}",
                first_of_month(today).format("%Y-%m"),
                window_end.format("%Y-%m")
            )));
        }
        let month_end = month_start
            .checked_add_months(Months::new(1))
            .map(|d| d - Duration::days(1))
            .unwrap_or(month_start);

        let slots = store.find_slots(chef.0, month_start, month_end).await?;
        Ok(build_views(&slots, month_start, month_end, today))
    }

    /// Open or close a cell for booking. Booked and past cells are refused
    /// with `InvalidTransition` and never written.
    pub async fn toggle<S: BookingStore + ?Sized>(
        store: &S,
        chef: ChefId,
        date: NaiveDate,
        time_slot: TimeSlot,
        is_active: bool,
        today: NaiveDate,
    ) -> AppResult<Slot> {
        let key = SlotKey { chef_id: chef.0, date, time_slot };
        let current = store.find_slot(key).await?;

        let status = derive_status(current.as_ref(), date, time_slot, today);
        if matches!(status, SlotStatus::Past | SlotStatus::Booked) {
            SLOT_TOGGLES_COUNTER.with_label_values(&["refused"]).inc();
            return Err(AppError::InvalidTransition(format!(
                "{date} {time_slot} is {status} and cannot be changed"
            )));
        }

        // The upsert re-checks `is_booked` itself, so a booking that lands
        // between the read above and this write is never overwritten.
        let Some(slot) = store.upsert_slot_active(key, is_active, &new_share_token()).await? else {
            SLOT_TOGGLES_COUNTER.with_label_values(&["refused"]).inc();
            return Err(AppError::InvalidTransition(format!(
                "{date} {time_slot} is booked and cannot be changed"
            )));
        };

        SLOT_TOGGLES_COUNTER.with_label_values(&["applied"]).inc();
        info!(
            chef_id = %chef.0,
            %date,
            %time_slot,
            is_active,
            "slot availability updated"
        );
        Ok(slot)
    }
}
