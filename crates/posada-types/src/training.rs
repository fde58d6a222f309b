//! Training corpus types.
//!
//! A corpus is historical conversation data mined into common
//! question/answer pairs plus structured hotel facts. The router searches
//! the most recent completed corpus as its second conversational tier and
//! feeds the hotel facts into the generation system prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::llm::ChatRole;

/// One turn inside a stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusTurn {
    pub role: ChatRole,
    pub content: String,
}

/// A complete stored conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<CorpusTurn>,
}

/// A mined question/answer pair with how often it was asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonQuestion {
    pub question: String,
    pub answer: String,
    pub frequency: u32,
}

/// Structured hotel facts extracted from the corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelFacts {
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub room_types: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
}

impl HotelFacts {
    /// Whether no facts were extracted at all.
    pub fn is_empty(&self) -> bool {
        self.amenities.is_empty()
            && self.policies.is_empty()
            && self.room_types.is_empty()
            && self.services.is_empty()
    }
}

/// Everything mined out of the raw conversations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedInfo {
    #[serde(default)]
    pub common_questions: Vec<CommonQuestion>,
    #[serde(default)]
    pub hotel_info: HotelFacts,
}

/// A completed training corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCorpus {
    pub id: Uuid,
    pub completed_at: DateTime<Utc>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub extracted_info: ExtractedInfo,
}
