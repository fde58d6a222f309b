//! Tiered response routing.
//!
//! One inbound `(session, message)` walks: cache check, booking gate,
//! script match, trained Q&A match, generation fallback. Every path
//! terminates in a [`posada_types::response::RouteResponse`]; no error
//! escapes `resolve_message`.

mod cache;
mod context;
mod corpus;
mod prompt;
mod scripts;
mod service;

pub use cache::ResponseCache;
pub use context::ConversationStore;
pub use corpus::{CONVERSATION_THRESHOLD, QUESTION_THRESHOLD, best_corpus_answer};
pub use prompt::GenerationPromptBuilder;
pub use scripts::{SCRIPT_THRESHOLD, ScriptMatch, best_script_match};
pub use service::MessageRouter;
