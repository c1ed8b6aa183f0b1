pub mod availability;
pub mod booking;
pub mod booking_code;
pub mod chefs;
pub mod dishes;
pub mod menu;
pub mod metrics;
pub mod orders;
