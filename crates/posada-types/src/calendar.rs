//! Tariff calendar data.
//!
//! Season windows, national holidays, long-holiday blocks, and
//! minimum-night rules are versioned configuration data, not code: the
//! default value carries the Peru hotel calendar, and a deployment can
//! override any table from `config.toml` without touching the engine.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing season for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Alta,
    Media,
    Baja,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Alta => write!(f, "alta"),
            Season::Media => write!(f, "media"),
            Season::Baja => write!(f, "baja"),
        }
    }
}

/// A month/day point in a recurring annual calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// The month/day of a concrete date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// A named annual window, possibly wrapping the year end (Dec 26 -> Mar 15).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringWindow {
    pub name: String,
    pub start: MonthDay,
    pub end: MonthDay,
}

impl RecurringWindow {
    pub fn new(name: impl Into<String>, start: MonthDay, end: MonthDay) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Whether the window covers `date`, inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let md = MonthDay::of(date);
        if self.start <= self.end {
            md >= self.start && md <= self.end
        } else {
            // Wraps the year boundary.
            md >= self.start || md <= self.end
        }
    }
}

/// A fixed-date national holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    pub name: String,
    pub month: u32,
    pub day: u32,
}

/// A minimum-night policy rule.
///
/// A rule fires either on a long-holiday window covering the check-in date,
/// or on the check-in falling on one of the listed weekdays. Rules are
/// evaluated in table order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumNightRule {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<RecurringWindow>,
    #[serde(default)]
    pub check_in_weekdays: Vec<Weekday>,
    pub min_nights: u32,
}

impl MinimumNightRule {
    /// Whether this rule applies to a stay starting on `check_in`.
    pub fn applies(&self, check_in: NaiveDate) -> bool {
        if let Some(window) = &self.window {
            return window.contains(check_in);
        }
        self.check_in_weekdays.contains(&check_in.weekday())
    }
}

/// The full tariff calendar for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffCalendar {
    /// Multi-day holiday blocks that force high season and elevated
    /// minimum-night requirements.
    pub long_holidays: Vec<RecurringWindow>,
    pub high_season: Vec<RecurringWindow>,
    pub mid_season: Vec<RecurringWindow>,
    pub fixed_holidays: Vec<FixedHoliday>,
    /// Evaluated in order; first matching rule wins.
    pub minimum_night_rules: Vec<MinimumNightRule>,
}

impl Default for TariffCalendar {
    /// The Peru hotel calendar the engine ships with.
    fn default() -> Self {
        let navidad = RecurringWindow::new(
            "Navidad y Año Nuevo",
            MonthDay::new(12, 24),
            MonthDay::new(1, 3),
        );
        let fiestas_patrias = RecurringWindow::new(
            "Fiestas Patrias",
            MonthDay::new(7, 26),
            MonthDay::new(7, 31),
        );
        let semana_santa =
            RecurringWindow::new("Semana Santa", MonthDay::new(4, 17), MonthDay::new(4, 20));
        let carnaval =
            RecurringWindow::new("Carnaval", MonthDay::new(2, 28), MonthDay::new(3, 2));

        Self {
            long_holidays: vec![
                navidad.clone(),
                fiestas_patrias.clone(),
                semana_santa.clone(),
                carnaval.clone(),
            ],
            high_season: vec![
                RecurringWindow::new("Verano", MonthDay::new(12, 26), MonthDay::new(3, 15)),
                RecurringWindow::new(
                    "Fiestas Patrias",
                    MonthDay::new(6, 28),
                    MonthDay::new(7, 31),
                ),
                RecurringWindow::new("Navidad", MonthDay::new(12, 24), MonthDay::new(12, 31)),
                semana_santa.clone(),
                carnaval.clone(),
            ],
            mid_season: vec![
                RecurringWindow::new("Post-verano", MonthDay::new(3, 16), MonthDay::new(4, 16)),
                RecurringWindow::new("Post-fiestas", MonthDay::new(8, 1), MonthDay::new(8, 31)),
            ],
            fixed_holidays: vec![
                fixed("Año Nuevo", 1, 1),
                fixed("Día del Trabajo", 5, 1),
                fixed("San Pedro y San Pablo", 6, 29),
                fixed("Fiestas Patrias", 7, 28),
                fixed("Fiestas Patrias", 7, 29),
                fixed("Santa Rosa de Lima", 8, 30),
                fixed("Combate de Angamos", 10, 8),
                fixed("Todos los Santos", 11, 1),
                fixed("Inmaculada Concepción", 12, 8),
                fixed("Navidad", 12, 25),
            ],
            minimum_night_rules: vec![
                MinimumNightRule {
                    label: "Año Nuevo".to_string(),
                    window: Some(navidad),
                    check_in_weekdays: vec![],
                    min_nights: 5,
                },
                MinimumNightRule {
                    label: "Fiestas Patrias".to_string(),
                    window: Some(fiestas_patrias),
                    check_in_weekdays: vec![],
                    min_nights: 5,
                },
                MinimumNightRule {
                    label: "Semana Santa".to_string(),
                    window: Some(semana_santa),
                    check_in_weekdays: vec![],
                    min_nights: 4,
                },
                MinimumNightRule {
                    label: "Carnaval".to_string(),
                    window: Some(carnaval),
                    check_in_weekdays: vec![],
                    min_nights: 3,
                },
                MinimumNightRule {
                    label: "fin de semana".to_string(),
                    window: None,
                    check_in_weekdays: vec![Weekday::Fri, Weekday::Sat],
                    min_nights: 2,
                },
            ],
        }
    }
}

fn fixed(name: &str, month: u32, day: u32) -> FixedHoliday {
    FixedHoliday {
        name: name.to_string(),
        month,
        day,
    }
}
