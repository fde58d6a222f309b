//! Infrastructure layer for Posada.
//!
//! Contains implementations of the port traits defined in `posada-core`:
//! in-memory stores for rooms, scripts, training corpora, conversation
//! contexts and the response cache, plus the OpenAI-compatible generation
//! provider and the `config.toml` loader.

pub mod config;
pub mod llm;
pub mod memory;
