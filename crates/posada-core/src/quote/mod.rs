//! Room allocation and quote building.

mod allocation;
mod builder;

pub use allocation::{FloorPreference, filter_available_rooms, floor_preference};
pub use builder::{QuoteEngine, needs_multiple_rooms};
