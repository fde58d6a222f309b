//! Candidate room filtering and ordering.

use posada_types::booking::BookingQuery;
use posada_types::calendar::TariffCalendar;
use posada_types::room::Room;

use crate::tariff::{long_holiday_for, resolve_nightly_rate};
use crate::text::normalize;

/// Room name marker for holiday-priced rooms.
const HOLIDAY_TAG: &str = "feriado";

/// Floor preference stated in the guest's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorPreference {
    Ground,
    Upper,
}

/// Detect a floor preference in the raw message.
pub fn floor_preference(raw_message: &str) -> Option<FloorPreference> {
    let text = normalize(raw_message);
    if text.contains("primer piso") {
        Some(FloorPreference::Ground)
    } else if text.contains("piso superior") || text.contains("segundo piso") {
        Some(FloorPreference::Upper)
    } else {
        None
    }
}

fn matches_floor(room: &Room, preference: FloorPreference) -> bool {
    let name = normalize(&room.name);
    match preference {
        FloorPreference::Ground => name.contains("primer piso") || name.contains("1er piso"),
        FloorPreference::Upper => name.contains("piso superior") || name.contains("segundo piso"),
    }
}

fn is_holiday_tagged(room: &Room) -> bool {
    normalize(&room.name).contains(HOLIDAY_TAG)
}

/// Filter and order candidate rooms for a query.
///
/// Keeps rooms that can host the paying guests; long-holiday stays narrow
/// to holiday-tagged rooms when any exist. Ordering: holiday tag first,
/// then floor-preference matches, then tightest capacity fit, then the
/// cheapest nightly rate.
pub fn filter_available_rooms(
    rooms: &[Room],
    query: &BookingQuery,
    calendar: &TariffCalendar,
) -> Vec<Room> {
    let paying = query.paying_guests();
    let preference = query
        .raw_message
        .as_deref()
        .and_then(floor_preference);
    let in_long_holiday = query
        .dates
        .is_some_and(|range| long_holiday_for(calendar, range.check_in).is_some());

    let mut candidates: Vec<Room> = rooms
        .iter()
        .filter(|room| room.capacity >= paying)
        .cloned()
        .collect();

    if in_long_holiday {
        let tagged: Vec<Room> = candidates
            .iter()
            .filter(|room| is_holiday_tagged(room))
            .cloned()
            .collect();
        if !tagged.is_empty() {
            tracing::debug!(
                tagged = tagged.len(),
                "long-holiday stay, narrowing to holiday-tagged rooms"
            );
            candidates = tagged;
        }
    }

    let nightly = |room: &Room| -> f64 {
        match query.dates {
            Some(range) => resolve_nightly_rate(room, range.check_in, rooms, calendar).rate,
            None => room.rack_rate,
        }
    };

    candidates.sort_by(|a, b| {
        let holiday = is_holiday_tagged(b).cmp(&is_holiday_tagged(a));
        let floor = preference
            .map(|p| matches_floor(b, p).cmp(&matches_floor(a, p)))
            .unwrap_or(std::cmp::Ordering::Equal);
        let fit = a
            .capacity
            .abs_diff(paying)
            .cmp(&b.capacity.abs_diff(paying));
        holiday
            .then(floor)
            .then(fit)
            .then_with(|| nightly(a).total_cmp(&nightly(b)))
    });

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use posada_types::booking::{DateRange, Guest};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room(name: &str, capacity: u32, rack: f64) -> Room {
        Room {
            id: Uuid::now_v7(),
            name: name.to_string(),
            room_type: "doble".to_string(),
            capacity,
            rack_rate: rack,
            occupancy_rates: vec![],
        }
    }

    fn query_for(guests: usize, range: Option<DateRange>, raw: &str) -> BookingQuery {
        BookingQuery {
            dates: range,
            guests: vec![Guest::adult(); guests],
            room_type: None,
            raw_message: Some(raw.to_string()),
        }
    }

    #[test]
    fn undersized_rooms_are_dropped() {
        let rooms = vec![room("Individual", 1, 60.0), room("Triple", 3, 120.0)];
        let query = query_for(3, None, "para 3 personas");
        let kept = filter_available_rooms(&rooms, &query, &TariffCalendar::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Triple");
    }

    #[test]
    fn tightest_fit_sorts_first() {
        let rooms = vec![
            room("Familiar", 6, 200.0),
            room("Doble", 2, 100.0),
            room("Triple", 3, 120.0),
        ];
        let query = query_for(2, None, "para 2 personas");
        let kept = filter_available_rooms(&rooms, &query, &TariffCalendar::default());
        assert_eq!(kept[0].name, "Doble");
        assert_eq!(kept[1].name, "Triple");
        assert_eq!(kept[2].name, "Familiar");
    }

    #[test]
    fn cheapest_breaks_capacity_ties() {
        let rooms = vec![room("Doble Vista", 2, 140.0), room("Doble Interior", 2, 100.0)];
        let query = query_for(2, None, "para 2 personas");
        let kept = filter_available_rooms(&rooms, &query, &TariffCalendar::default());
        assert_eq!(kept[0].name, "Doble Interior");
    }

    #[test]
    fn floor_preference_is_honored() {
        let rooms = vec![
            room("Doble Primer Piso", 2, 100.0),
            room("Doble Piso Superior", 2, 100.0),
        ];
        let range = DateRange::new(date(2026, 5, 12), date(2026, 5, 14));
        let query = query_for(2, range, "doble en el piso superior para 2 personas");
        let kept = filter_available_rooms(&rooms, &query, &TariffCalendar::default());
        assert_eq!(kept[0].name, "Doble Piso Superior");
    }

    #[test]
    fn long_holiday_narrows_to_tagged_rooms() {
        let rooms = vec![room("Doble 1", 2, 100.0), room("Doble Feriado", 2, 180.0)];
        let range = DateRange::new(date(2026, 12, 28), date(2027, 1, 2));
        let query = query_for(2, range, "del 28 de diciembre al 2 de enero, 2 personas");
        let kept = filter_available_rooms(&rooms, &query, &TariffCalendar::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Doble Feriado");
    }

    #[test]
    fn no_tagged_rooms_keeps_everything() {
        let rooms = vec![room("Doble 1", 2, 100.0), room("Doble 2", 2, 110.0)];
        let range = DateRange::new(date(2026, 12, 28), date(2027, 1, 2));
        let query = query_for(2, range, "2 personas");
        let kept = filter_available_rooms(&rooms, &query, &TariffCalendar::default());
        assert_eq!(kept.len(), 2);
    }
}
