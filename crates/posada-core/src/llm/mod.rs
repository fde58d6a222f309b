//! Generation provider abstraction.

mod box_provider;
mod provider;

pub use box_provider::{BoxGenerationProvider, GenerationProviderDyn};
pub use provider::GenerationProvider;
