//! Operator-authored trigger/response scripts.
//!
//! Scripts are the first conversational tier: a deterministic canned reply
//! chosen by trigger similarity. The special `error_fallback` category marks
//! the script used when the generation provider fails.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category value designating the provider-failure fallback script.
pub const ERROR_FALLBACK_CATEGORY: &str = "error_fallback";

/// An operator-authored trigger/response pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub id: Uuid,
    /// Phrases that should fire this script. Matching is done over
    /// normalized text; empty or whitespace-only triggers are skipped.
    pub triggers: Vec<String>,
    pub response: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// When set, the script only fires if the message carries a date range.
    #[serde(default)]
    pub requires_date: bool,
    /// When set, the script only fires if the message names a room type.
    #[serde(default)]
    pub requires_room_type: bool,
    /// When set, the script only fires if the message states a guest count.
    #[serde(default)]
    pub requires_occupancy: bool,
}

impl Script {
    /// Whether this script is the designated provider-failure fallback.
    pub fn is_error_fallback(&self) -> bool {
        self.category.as_deref() == Some(ERROR_FALLBACK_CATEGORY)
    }
}
