//! Text normalization and similarity scoring.
//!
//! Every matcher downstream (scripts, trained Q&A, intent patterns) works
//! over normalized text so accent and case variation never create false
//! negatives.

mod normalize;
mod similarity;

pub use normalize::normalize;
pub use similarity::{jaccard, token_set};
