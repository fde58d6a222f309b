//! Date-range extraction from Spanish messages.
//!
//! Four shapes are tried in order, each an independent parser in a
//! chain-of-responsibility: the first one that both matches and yields a
//! valid range (`check_out > check_in`, `check_in >= today`) wins.
//!
//! 1. "del 10 al 12 de marzo [de 2026]"
//! 2. "10 al 12 de marzo [de 2026]"
//! 3. "28 de diciembre al 2 de enero [de 2026]"
//! 4. "del 28 de diciembre al 2 de enero [de 2026]"

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use posada_types::booking::DateRange;

use crate::text::normalize;

/// Month-name alternation. Peru uses both "setiembre" and "septiembre".
const MONTH_NAMES: &str = "enero|febrero|marzo|abril|mayo|junio|julio|agosto|setiembre|septiembre|octubre|noviembre|diciembre";

fn month_number(name: &str) -> Option<u32> {
    let number = match name {
        "enero" => 1,
        "febrero" => 2,
        "marzo" => 3,
        "abril" => 4,
        "mayo" => 5,
        "junio" => 6,
        "julio" => 7,
        "agosto" => 8,
        "setiembre" | "septiembre" => 9,
        "octubre" => 10,
        "noviembre" => 11,
        "diciembre" => 12,
        _ => return None,
    };
    Some(number)
}

static SAME_MONTH_DEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"del\s+(\d{{1,2}})\s+al\s+(\d{{1,2}})\s+de\s+({MONTH_NAMES})(?:\s+(?:de\s+|del\s+)?(\d{{4}}))?"
    ))
    .expect("same-month 'del' pattern")
});

static SAME_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(\d{{1,2}})\s+al\s+(\d{{1,2}})\s+de\s+({MONTH_NAMES})(?:\s+(?:de\s+|del\s+)?(\d{{4}}))?"
    ))
    .expect("same-month pattern")
});

static CROSS_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(\d{{1,2}})\s+de\s+({MONTH_NAMES})\s+al\s+(\d{{1,2}})\s+de\s+({MONTH_NAMES})(?:\s+(?:de\s+|del\s+)?(\d{{4}}))?"
    ))
    .expect("cross-month pattern")
});

static CROSS_MONTH_DEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"del\s+(\d{{1,2}})\s+de\s+({MONTH_NAMES})\s+al\s+(\d{{1,2}})\s+de\s+({MONTH_NAMES})(?:\s+(?:de\s+|del\s+)?(\d{{4}}))?"
    ))
    .expect("cross-month 'del' pattern")
});

/// Extract a check-in/check-out range from a message, validated against the
/// local calendar date.
pub fn extract_dates(message: &str) -> Option<DateRange> {
    extract_dates_from(message, Local::now().date_naive())
}

/// Extract a check-in/check-out range, validated against `today`.
///
/// Returns `None` when no shape matches or every matching shape produces an
/// invalid range (inverted, zero nights, or already in the past).
pub fn extract_dates_from(message: &str, today: NaiveDate) -> Option<DateRange> {
    let text = normalize(message);

    let parsers: [fn(&str, NaiveDate) -> Option<DateRange>; 4] = [
        parse_same_month_del,
        parse_same_month,
        parse_cross_month,
        parse_cross_month_del,
    ];

    for parse in parsers {
        if let Some(range) = parse(&text, today) {
            tracing::debug!(
                check_in = %range.check_in,
                check_out = %range.check_out,
                "extracted date range"
            );
            return Some(range);
        }
    }
    None
}

/// Default year when the message omits one: the current year, or the next
/// year when the message arrives in December (a bare "enero" then almost
/// certainly means January of next year, not a past date).
fn default_year(today: NaiveDate) -> i32 {
    if today.month() == 12 {
        today.year() + 1
    } else {
        today.year()
    }
}

fn validated(check_in: NaiveDate, check_out: NaiveDate, today: NaiveDate) -> Option<DateRange> {
    if check_in < today {
        return None;
    }
    DateRange::new(check_in, check_out)
}

fn parse_same_month_del(text: &str, today: NaiveDate) -> Option<DateRange> {
    same_month(&SAME_MONTH_DEL, text, today)
}

fn parse_same_month(text: &str, today: NaiveDate) -> Option<DateRange> {
    same_month(&SAME_MONTH, text, today)
}

fn same_month(pattern: &Regex, text: &str, today: NaiveDate) -> Option<DateRange> {
    let caps = pattern.captures(text)?;
    let start_day: u32 = caps[1].parse().ok()?;
    let end_day: u32 = caps[2].parse().ok()?;
    let month = month_number(&caps[3])?;
    let year = caps
        .get(4)
        .map_or_else(|| Some(default_year(today)), |m| m.as_str().parse().ok())?;

    let check_in = NaiveDate::from_ymd_opt(year, month, start_day)?;
    let check_out = NaiveDate::from_ymd_opt(year, month, end_day)?;
    validated(check_in, check_out, today)
}

fn parse_cross_month(text: &str, today: NaiveDate) -> Option<DateRange> {
    cross_month(&CROSS_MONTH, text, today)
}

fn parse_cross_month_del(text: &str, today: NaiveDate) -> Option<DateRange> {
    cross_month(&CROSS_MONTH_DEL, text, today)
}

fn cross_month(pattern: &Regex, text: &str, today: NaiveDate) -> Option<DateRange> {
    let caps = pattern.captures(text)?;
    let start_day: u32 = caps[1].parse().ok()?;
    let start_month = month_number(&caps[2])?;
    let end_day: u32 = caps[3].parse().ok()?;
    let end_month = month_number(&caps[4])?;
    let year = caps
        .get(5)
        .map_or_else(|| Some(default_year(today)), |m| m.as_str().parse().ok())?;

    // "28 de diciembre al 2 de enero" crosses into the next year.
    let end_year = if end_month < start_month { year + 1 } else { year };

    let check_in = NaiveDate::from_ymd_opt(year, start_month, start_day)?;
    let check_out = NaiveDate::from_ymd_opt(end_year, end_month, end_day)?;
    validated(check_in, check_out, today)
}
