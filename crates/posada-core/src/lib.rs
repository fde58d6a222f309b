//! Booking intelligence and response routing for Posada.
//!
//! This crate holds the whole engine: text normalization, Spanish-pattern
//! intent extraction, the seasonal tariff waterfall, multi-room allocation
//! and quote building, and the tiered response router. It defines the
//! "ports" (store traits and the generation-provider trait) that
//! `posada-infra` implements; it never performs I/O itself.

pub mod intent;
pub mod llm;
pub mod quote;
pub mod repository;
pub mod router;
pub mod tariff;
pub mod text;
