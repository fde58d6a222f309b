//! Room catalog types.
//!
//! Rooms are owned by the catalog collaborator and read-only to the engine.
//! A room carries a rack rate plus any number of named, date-bounded, or
//! occupancy-bounded rate entries; several entries may be valid for the same
//! date, and the tariff waterfall disambiguates by name-pattern priority.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, date-bounded, or occupancy-bounded price record for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<u32>,
    pub rate: f64,
}

impl RateEntry {
    /// Whether this entry's validity window covers `date`.
    ///
    /// A missing bound is open on that side; an entry with no bounds at all
    /// is always valid.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|s| date >= s) && self.end_date.is_none_or(|e| date <= e)
    }
}

/// A sellable room, as published by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub room_type: String,
    pub capacity: u32,
    /// Default list price per night, absent any seasonal override.
    pub rack_rate: f64,
    #[serde(default)]
    pub occupancy_rates: Vec<RateEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unbounded_entry_covers_any_date() {
        let entry = RateEntry {
            name: None,
            start_date: None,
            end_date: None,
            occupancy: None,
            rate: 120.0,
        };
        assert!(entry.covers(date(2026, 1, 1)));
        assert!(entry.covers(date(2026, 12, 31)));
    }

    #[test]
    fn bounded_entry_covers_inclusive_window() {
        let entry = RateEntry {
            name: Some("verano".to_string()),
            start_date: Some(date(2026, 12, 26)),
            end_date: Some(date(2027, 3, 15)),
            occupancy: None,
            rate: 180.0,
        };
        assert!(entry.covers(date(2026, 12, 26)));
        assert!(entry.covers(date(2027, 3, 15)));
        assert!(!entry.covers(date(2026, 12, 25)));
        assert!(!entry.covers(date(2027, 3, 16)));
    }
}
