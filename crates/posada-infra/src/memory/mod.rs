//! In-memory implementations of the posada-core port traits.
//!
//! All engine state lives in process memory: the room catalog, operator
//! scripts, and training corpora are replaced wholesale by the operator
//! sync, while conversation contexts and the response cache accumulate and
//! expire per session.

mod catalog;
mod conversation;
mod response_cache;
mod script;
mod training;

pub use catalog::InMemoryCatalog;
pub use conversation::InMemoryConversationStore;
pub use response_cache::InMemoryResponseCache;
pub use script::InMemoryScriptStore;
pub use training::InMemoryTrainingStore;
