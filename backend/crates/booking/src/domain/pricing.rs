//! Price Computation
//!
//! A pure function of (rate table, duration, quantity). The computed total
//! is frozen on the booking at creation; later catalog rate changes never
//! reprice existing bookings.

use catalog::models::Machine;
use rust_decimal::Decimal;

use crate::domain::entities::RentalDuration;

/// Per-unit rate for the chosen billing granularity.
pub fn rate_for(machine: &Machine, duration: RentalDuration) -> Decimal {
    match duration {
        RentalDuration::Hour => machine.price_per_hour,
        RentalDuration::Day => machine.price_per_day,
        RentalDuration::Week => machine.price_per_week,
        RentalDuration::Month => machine.price_per_month,
    }
}

/// `rate(duration) * quantity`
pub fn total_price(machine: &Machine, duration: RentalDuration, quantity: i32) -> Decimal {
    rate_for(machine, duration) * Decimal::from(quantity)
}
