//! Seasonal tariff resolution.
//!
//! State-free functions over a `TariffCalendar`: season and holiday
//! classification, the rate-resolution waterfall, stay pricing, and the
//! minimum-night policy validator.

mod calendar;
mod policy;
mod waterfall;

pub use calendar::{is_festivo, is_weekend, long_holiday_for, season_for};
pub use policy::{MinimumNightCheck, validate_minimum_nights};
pub use waterfall::{RateRule, ResolvedRate, StayPricing, calculate_room_rate, resolve_nightly_rate};
