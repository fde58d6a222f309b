//! Observability for Posada.

pub mod tracing_setup;
