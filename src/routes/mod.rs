pub mod bookings;
pub mod chef;
pub mod dishes;
pub mod health;
pub mod menu;
pub mod metrics;
pub mod orders;
pub mod schedule;
pub mod share;
