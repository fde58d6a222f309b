//! The rate-resolution waterfall.
//!
//! Eight precedence steps, each an independent resolver evaluated only when
//! every step before it yielded nothing. Holiday-named entries beat season
//! entries, season entries beat day-of-week entries, and the rack rate is
//! the unconditional last step, so resolution never fails.

use chrono::NaiveDate;

use posada_types::booking::DateRange;
use posada_types::calendar::{RecurringWindow, Season, TariffCalendar};
use posada_types::config::PricingPolicy;
use posada_types::room::{RateEntry, Room};

use crate::text::normalize;

use super::calendar::{is_weekend, long_holiday_for, season_for};

/// Name markers for holiday-priced rate entries and rooms.
const HOLIDAY_KEYWORD: &str = "feriado";

/// Name markers for high-season rate entries and rooms.
const HIGH_SEASON_KEYWORDS: &[&str] = &["temporada alta", "verano"];

/// Name markers distinguishing weekend from weekday season entries.
const WEEKEND_MARKERS: &[&str] = &["fin de semana", "sabado", "domingo"];
const WEEKDAY_MARKERS: &[&str] = &["entre semana", "lunes a viernes"];

/// Which waterfall step produced a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRule {
    /// 1. Holiday-named rate entry valid for the date.
    HolidayEntry,
    /// 2. The room itself is holiday-tagged; rack rate.
    HolidayRoomRack,
    /// 3. A holiday-tagged sibling of the same type; its rack rate.
    HolidaySiblingRack,
    /// 4. High-season/verano rate entry valid for the date.
    HighSeasonEntry,
    /// 5. The room itself is high-season-tagged; rack rate.
    HighSeasonRoomRack,
    /// 6. Entry matching the (season, weekend-vs-weekday) combination.
    SeasonDayEntry,
    /// 7. Highest currently-valid entry. Last resort, logged as a fallback.
    HighestValidEntry,
    /// 8. The room's rack rate.
    RackRate,
}

/// A resolved nightly rate plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRate {
    pub rate: f64,
    pub rule: RateRule,
}

/// Everything a waterfall step may look at.
struct StepContext<'a> {
    room: &'a Room,
    date: NaiveDate,
    siblings: &'a [Room],
    long_holiday: Option<&'a RecurringWindow>,
    season: Season,
}

fn name_contains(name: &str, marker: &str) -> bool {
    normalize(name).contains(marker)
}

fn entry_name_contains(entry: &RateEntry, marker: &str) -> bool {
    entry.name.as_deref().is_some_and(|n| name_contains(n, marker))
}

/// Step 1: holiday-named entry whose validity window covers the date.
fn holiday_entry(ctx: &StepContext) -> Option<ResolvedRate> {
    let holiday = ctx.long_holiday?;
    let holiday_name = normalize(&holiday.name);

    ctx.room
        .occupancy_rates
        .iter()
        .find(|entry| {
            entry.covers(ctx.date)
                && (entry_name_contains(entry, HOLIDAY_KEYWORD)
                    || entry_name_contains(entry, &holiday_name))
        })
        .map(|entry| ResolvedRate {
            rate: entry.rate,
            rule: RateRule::HolidayEntry,
        })
}

/// Step 2: the room's own name carries the holiday keyword.
fn holiday_room_rack(ctx: &StepContext) -> Option<ResolvedRate> {
    ctx.long_holiday?;
    name_contains(&ctx.room.name, HOLIDAY_KEYWORD).then_some(ResolvedRate {
        rate: ctx.room.rack_rate,
        rule: RateRule::HolidayRoomRack,
    })
}

/// Step 3: a holiday-tagged sibling of the same type, used as a reference.
fn holiday_sibling_rack(ctx: &StepContext) -> Option<ResolvedRate> {
    ctx.long_holiday?;
    ctx.siblings
        .iter()
        .find(|sibling| {
            sibling.id != ctx.room.id
                && sibling.room_type == ctx.room.room_type
                && name_contains(&sibling.name, HOLIDAY_KEYWORD)
        })
        .map(|sibling| ResolvedRate {
            rate: sibling.rack_rate,
            rule: RateRule::HolidaySiblingRack,
        })
}

/// Step 4: high-season/verano entry valid for the date.
fn high_season_entry(ctx: &StepContext) -> Option<ResolvedRate> {
    if ctx.season != Season::Alta {
        return None;
    }
    ctx.room
        .occupancy_rates
        .iter()
        .find(|entry| {
            entry.covers(ctx.date)
                && HIGH_SEASON_KEYWORDS
                    .iter()
                    .any(|kw| entry_name_contains(entry, kw))
        })
        .map(|entry| ResolvedRate {
            rate: entry.rate,
            rule: RateRule::HighSeasonEntry,
        })
}

/// Step 5: the room's own name flags high season.
fn high_season_room_rack(ctx: &StepContext) -> Option<ResolvedRate> {
    if ctx.season != Season::Alta {
        return None;
    }
    HIGH_SEASON_KEYWORDS
        .iter()
        .any(|kw| name_contains(&ctx.room.name, kw))
        .then_some(ResolvedRate {
            rate: ctx.room.rack_rate,
            rule: RateRule::HighSeasonRoomRack,
        })
}

/// Step 6: entry matching the (season, weekend-vs-weekday) combination.
fn season_day_entry(ctx: &StepContext) -> Option<ResolvedRate> {
    let season_label = ctx.season.to_string();
    let day_markers: &[&str] = if is_weekend(ctx.date) {
        WEEKEND_MARKERS
    } else {
        WEEKDAY_MARKERS
    };

    ctx.room
        .occupancy_rates
        .iter()
        .find(|entry| {
            entry.covers(ctx.date)
                && entry_name_contains(entry, &season_label)
                && day_markers.iter().any(|m| entry_name_contains(entry, m))
        })
        .map(|entry| ResolvedRate {
            rate: entry.rate,
            rule: RateRule::SeasonDayEntry,
        })
}

/// Step 7: the highest-valued entry still valid for the date.
fn highest_valid_entry(ctx: &StepContext) -> Option<ResolvedRate> {
    ctx.room
        .occupancy_rates
        .iter()
        .filter(|entry| entry.covers(ctx.date))
        .max_by(|a, b| a.rate.total_cmp(&b.rate))
        .map(|entry| {
            tracing::warn!(
                room = %ctx.room.name,
                date = %ctx.date,
                rate = entry.rate,
                "rate waterfall exhausted name patterns, using highest valid entry"
            );
            ResolvedRate {
                rate: entry.rate,
                rule: RateRule::HighestValidEntry,
            }
        })
}

/// Resolve the nightly rate for a room on a date.
///
/// Walks the waterfall in order; the rack rate guarantees a result.
pub fn resolve_nightly_rate(
    room: &Room,
    date: NaiveDate,
    siblings: &[Room],
    calendar: &TariffCalendar,
) -> ResolvedRate {
    let ctx = StepContext {
        room,
        date,
        siblings,
        long_holiday: long_holiday_for(calendar, date),
        season: season_for(calendar, date),
    };

    let steps: [fn(&StepContext) -> Option<ResolvedRate>; 7] = [
        holiday_entry,
        holiday_room_rack,
        holiday_sibling_rack,
        high_season_entry,
        high_season_room_rack,
        season_day_entry,
        highest_valid_entry,
    ];

    let resolved = steps
        .iter()
        .find_map(|step| step(&ctx))
        .unwrap_or(ResolvedRate {
            rate: room.rack_rate,
            rule: RateRule::RackRate,
        });

    tracing::debug!(
        room = %room.name,
        date = %date,
        rate = resolved.rate,
        rule = ?resolved.rule,
        "resolved nightly rate"
    );
    resolved
}

/// Priced stay for one room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayPricing {
    pub nights: u32,
    pub nightly_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub discounted_total: f64,
    pub rule: RateRule,
}

/// Price a stay for one room.
///
/// The nightly rate is resolved once, at check-in, and applied to every
/// night of the stay.
pub fn calculate_room_rate(
    room: &Room,
    range: DateRange,
    siblings: &[Room],
    calendar: &TariffCalendar,
    pricing: &PricingPolicy,
) -> StayPricing {
    let nights = range.nights();
    let resolved = resolve_nightly_rate(room, range.check_in, siblings, calendar);

    let subtotal = resolved.rate * nights as f64;
    let tax = subtotal * pricing.tax_rate;
    let total = subtotal + tax;
    let discounted_total = total * (1.0 - pricing.promo_discount);

    StayPricing {
        nights,
        nightly_rate: resolved.rate,
        subtotal,
        tax,
        total,
        discounted_total,
        rule: resolved.rule,
    }
}
