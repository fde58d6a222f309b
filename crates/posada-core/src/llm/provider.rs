//! GenerationProvider trait definition.

use posada_types::llm::{GenerationError, GenerationRequest, GenerationResponse};

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition); wrap in
/// [`super::BoxGenerationProvider`] when dynamic dispatch is needed.
/// Implementations live in posada-infra (e.g. `OpenAiCompatibleProvider`).
pub trait GenerationProvider: Send + Sync {
    /// Human-readable provider name for logging.
    fn name(&self) -> &str;

    /// Send a completion request and receive the full plain-text response.
    fn complete(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<GenerationResponse, GenerationError>> + Send;
}
