//! Linear proration of a monthly price difference.
//!
//! A month is always 30 days here, whatever the calendar says.

use chrono::{DateTime, Utc};

pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Whole days from `now` until `last_active_date`, rounded to the nearest day.
///
/// Halves round away from zero, which for the non-negative spans produced by
/// an active window is the same as rounding up.
pub fn days_remaining(last_active_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (last_active_date - now).num_milliseconds();
    (millis as f64 / MS_PER_DAY as f64).round() as i64
}

pub fn price_difference(current_monthly: f64, new_monthly: f64) -> f64 {
    new_monthly - current_monthly
}

/// `(difference / 30) * days`, evaluated in that order.
pub fn prorated_upgrade_price(price_difference: f64, days_remaining: i64) -> f64 {
    (price_difference / DAYS_PER_MONTH) * days_remaining as f64
}
