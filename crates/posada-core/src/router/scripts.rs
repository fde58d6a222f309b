//! Script trigger matching.

use posada_types::script::Script;

use crate::intent::{extract_dates, extract_guests, extract_room_type};
use crate::text::{jaccard, normalize};

/// Minimum similarity for a script trigger to fire. Strictly exceeded.
pub const SCRIPT_THRESHOLD: f64 = 0.4;

/// A script selected by trigger similarity.
#[derive(Debug, Clone, Copy)]
pub struct ScriptMatch<'a> {
    pub script: &'a Script,
    pub score: f64,
}

/// Pick the best-matching active script for a message, if any clears the
/// threshold.
///
/// Each trigger is normalized and compared against the normalized message:
/// substring containment in either direction scores 1.0, otherwise the
/// Jaccard similarity of the token sets is used. Empty or whitespace-only
/// triggers are skipped rather than failing the whole script. Scripts
/// whose `requires_*` prerequisite the message does not carry are never
/// considered.
pub fn best_script_match<'a>(message: &str, scripts: &'a [Script]) -> Option<ScriptMatch<'a>> {
    let normalized = normalize(message);
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    let mut best: Option<ScriptMatch<'a>> = None;
    'scripts: for script in scripts.iter().filter(|s| s.active) {
        if !prerequisites_met(script, message) {
            continue;
        }
        for trigger in &script.triggers {
            let trigger = normalize(trigger);
            let trigger = trigger.trim();
            if trigger.is_empty() {
                continue;
            }
            let score = if normalized.contains(trigger) || trigger.contains(normalized) {
                1.0
            } else {
                jaccard(normalized, trigger)
            };
            if best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(ScriptMatch { script, score });
            }
            // a perfect score cannot be improved on
            if score == 1.0 {
                break 'scripts;
            }
        }
    }

    best.filter(|m| m.score > SCRIPT_THRESHOLD)
}

fn prerequisites_met(script: &Script, message: &str) -> bool {
    if script.requires_date && extract_dates(message).is_none() {
        return false;
    }
    if script.requires_room_type && extract_room_type(message).is_none() {
        return false;
    }
    if script.requires_occupancy && extract_guests(message).is_empty() {
        return false;
    }
    true
}
