//! Jaccard similarity over word token sets.

use std::collections::BTreeSet;

/// Word token set of a (normalized) string. Splitting on every
/// non-alphanumeric character keeps "¿piscina?" and "piscina" the same
/// token.
pub fn token_set(text: &str) -> BTreeSet<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|` over word token sets.
///
/// Callers are expected to pass normalized text. Two token-less strings
/// score 0.0: there is nothing to match on.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let set_a = token_set(a);
    let set_b = token_set(b);

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}
