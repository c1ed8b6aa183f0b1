use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    pub static ref BOOKINGS_COUNTER: CounterVec = register_counter_vec!(
        "api_bookings_total",
        "Booking submissions by outcome",
        &["outcome"]
    ).unwrap();

    pub static ref SLOT_TOGGLES_COUNTER: CounterVec = register_counter_vec!(
        "api_slot_toggles_total",
        "Chef slot open/close requests by outcome",
        &["outcome"]
    ).unwrap();

    pub static ref ORDER_TRANSITIONS_COUNTER: CounterVec = register_counter_vec!(
        "api_order_transitions_total",
        "Order status changes by target status",
        &["status"]
    ).unwrap();
}
