//! Shared domain types for Posada.
//!
//! Everything here is plain data: booking queries, rooms and rate entries,
//! operator scripts, training corpora, route responses, the tariff calendar,
//! and the engine configuration. No I/O, no business logic beyond small
//! invariant helpers.

pub mod booking;
pub mod calendar;
pub mod config;
pub mod error;
pub mod llm;
pub mod response;
pub mod room;
pub mod script;
pub mod training;
