//! Season and holiday classification over a tariff calendar.

use chrono::{Datelike, NaiveDate, Weekday};

use posada_types::calendar::{RecurringWindow, Season, TariffCalendar};

/// The long-holiday window covering `date`, if any.
pub fn long_holiday_for(calendar: &TariffCalendar, date: NaiveDate) -> Option<&RecurringWindow> {
    calendar
        .long_holidays
        .iter()
        .find(|window| window.contains(date))
}

/// Season for a date.
///
/// Long holidays always force high season; then the high-season windows,
/// then the mid-season windows; everything else is low season.
pub fn season_for(calendar: &TariffCalendar, date: NaiveDate) -> Season {
    if long_holiday_for(calendar, date).is_some() {
        return Season::Alta;
    }
    if calendar.high_season.iter().any(|w| w.contains(date)) {
        return Season::Alta;
    }
    if calendar.mid_season.iter().any(|w| w.contains(date)) {
        return Season::Media;
    }
    Season::Baja
}

/// Whether `date` is a fixed-date national holiday.
pub fn is_festivo(calendar: &TariffCalendar, date: NaiveDate) -> bool {
    calendar
        .fixed_holidays
        .iter()
        .any(|h| h.month == date.month() && h.day == date.day())
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> TariffCalendar {
        TariffCalendar::default()
    }

    #[test]
    fn summer_is_high_season() {
        assert_eq!(season_for(&calendar(), date(2026, 1, 20)), Season::Alta);
        assert_eq!(season_for(&calendar(), date(2026, 3, 15)), Season::Alta);
    }

    #[test]
    fn national_day_break_is_high_season() {
        assert_eq!(season_for(&calendar(), date(2026, 7, 10)), Season::Alta);
    }

    #[test]
    fn long_holidays_force_high_season() {
        assert_eq!(season_for(&calendar(), date(2026, 12, 24)), Season::Alta);
        assert_eq!(season_for(&calendar(), date(2026, 4, 18)), Season::Alta);
    }

    #[test]
    fn post_summer_is_mid_season() {
        assert_eq!(season_for(&calendar(), date(2026, 3, 25)), Season::Media);
        assert_eq!(season_for(&calendar(), date(2026, 8, 15)), Season::Media);
    }

    #[test]
    fn everything_else_is_low_season() {
        assert_eq!(season_for(&calendar(), date(2026, 5, 12)), Season::Baja);
        assert_eq!(season_for(&calendar(), date(2026, 10, 14)), Season::Baja);
    }

    #[test]
    fn fixed_holidays() {
        assert!(is_festivo(&calendar(), date(2026, 7, 28)));
        assert!(is_festivo(&calendar(), date(2026, 12, 25)));
        assert!(!is_festivo(&calendar(), date(2026, 3, 3)));
    }

    #[test]
    fn long_holiday_lookup() {
        let cal = calendar();
        assert_eq!(
            long_holiday_for(&cal, date(2026, 12, 30)).map(|w| w.name.as_str()),
            Some("Navidad y Año Nuevo")
        );
        assert_eq!(
            long_holiday_for(&cal, date(2027, 1, 2)).map(|w| w.name.as_str()),
            Some("Navidad y Año Nuevo")
        );
        assert!(long_holiday_for(&cal, date(2026, 6, 10)).is_none());
    }

    #[test]
    fn weekend_detection() {
        // 2026-06-06 is a Saturday
        assert!(is_weekend(date(2026, 6, 6)));
        assert!(is_weekend(date(2026, 6, 7)));
        assert!(!is_weekend(date(2026, 6, 8)));
    }
}
