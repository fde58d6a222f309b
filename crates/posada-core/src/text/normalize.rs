//! Diacritic-insensitive text normalization.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize text for matching: Unicode-decompose, strip combining
/// diacritical marks, lowercase.
///
/// Pure and idempotent. "Habitación Cuádruple" becomes
/// "habitacion cuadruple".
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
