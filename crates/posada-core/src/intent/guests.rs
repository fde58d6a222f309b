//! Guest-count extraction.
//!
//! Recognizes digit counts ("4 personas") and Spanish number words
//! ("cuatro personas") next to a guest noun. Counts outside [1, 10] are
//! treated as a miss. Age granularity is not extracted at this stage; the
//! result is adult placeholders.

use regex::Regex;
use std::sync::LazyLock;

use posada_types::booking::Guest;

use crate::text::normalize;

/// Guest nouns the count must be attached to.
const GUEST_NOUNS: &str = "personas?|adultos?|huespedes?|pasajeros?|pax";

/// Largest party size a single query may state.
const MAX_GUESTS: usize = 10;

static DIGIT_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(\d{{1,2}})\s*(?:{GUEST_NOUNS})\b")).expect("digit guest pattern")
});

static WORD_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(un|uno|una|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez)\s+(?:{GUEST_NOUNS})\b"
    ))
    .expect("word guest pattern")
});

fn word_number(word: &str) -> Option<usize> {
    let number = match word {
        "un" | "uno" | "una" => 1,
        "dos" => 2,
        "tres" => 3,
        "cuatro" => 4,
        "cinco" => 5,
        "seis" => 6,
        "siete" => 7,
        "ocho" => 8,
        "nueve" => 9,
        "diez" => 10,
        _ => return None,
    };
    Some(number)
}

/// Extract the stated guest count as adult placeholders.
///
/// Returns an empty vector on a miss.
pub fn extract_guests(message: &str) -> Vec<Guest> {
    let text = normalize(message);

    let count = DIGIT_COUNT
        .captures(&text)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .or_else(|| {
            WORD_COUNT
                .captures(&text)
                .and_then(|caps| word_number(&caps[1]))
        });

    match count {
        Some(n) if (1..=MAX_GUESTS).contains(&n) => {
            tracing::debug!(guests = n, "extracted guest count");
            vec![Guest::adult(); n]
        }
        _ => Vec::new(),
    }
}
