//! Room-type and multi-room extraction.

use regex::Regex;
use std::sync::LazyLock;

use posada_types::booking::{Guest, RoomAllocation};

use crate::text::normalize;

use super::guests::extract_guests;

/// Room-type vocabulary, in normalized form.
const ROOM_TYPES: &[&str] = &[
    "matrimonial",
    "individual",
    "doble",
    "triple",
    "cuadruple",
    "familiar",
];

static ROOM_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})\s*habitaciones\b").expect("room count pattern"));

static PERSON_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"para\s+(\d{1,2})\s*personas?\b").expect("person count pattern")
});

/// Substring match against the fixed room-type vocabulary.
pub fn extract_room_type(message: &str) -> Option<String> {
    let text = normalize(message);
    ROOM_TYPES
        .iter()
        .find(|room_type| text.contains(*room_type))
        .map(|room_type| room_type.to_string())
}

/// Whether the message asks for more than one room.
pub fn is_multi_room_query(message: &str) -> bool {
    requested_rooms(message).is_some_and(|n| n > 1)
}

fn requested_rooms(message: &str) -> Option<u32> {
    let text = normalize(message);
    ROOM_COUNT
        .captures(&text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Split the stated guests evenly across the requested rooms.
///
/// "3 habitaciones para 7 personas" yields 3 rooms of `ceil(7/3) = 3`
/// adult placeholders each. The even split is deliberate and can exceed a
/// concrete room's capacity; the allocator surfaces that, it is not
/// silently corrected here. Falls back to the plain guest extractor when
/// the "para M personas" tail is absent; with no guest count anywhere the
/// distribution is a miss.
pub fn extract_room_distribution(message: &str) -> Option<Vec<RoomAllocation>> {
    let rooms = requested_rooms(message)?;
    if rooms == 0 {
        return None;
    }

    let text = normalize(message);
    let guests = PERSON_COUNT
        .captures(&text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or_else(|| extract_guests(message).len() as u32);
    if guests == 0 {
        return None;
    }

    let per_room = guests.div_ceil(rooms);
    tracing::debug!(rooms, guests, per_room, "extracted room distribution");

    Some(
        (1..=rooms)
            .map(|room_number| RoomAllocation {
                room_number,
                guests: vec![Guest::adult(); per_room as usize],
            })
            .collect(),
    )
}
