//! Configuration for OpenAI-compatible generation providers.
//!
//! Any endpoint that speaks the OpenAI chat completions protocol works;
//! the factory functions return an [`OpenAiCompatConfig`] with the right
//! base URL.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible generation provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`]. The API key is
/// wrapped in [`SecretString`] so it never shows up in debug output.
pub struct OpenAiCompatConfig {
    /// Human-readable provider name for logging (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key: SecretString::from(api_key.to_string()),
        model: model.into(),
    }
}

/// Configuration for any other OpenAI-compatible endpoint.
pub fn compatible_endpoint(
    provider_name: &str,
    base_url: &str,
    api_key: &str,
    model: &str,
) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url: base_url.into(),
        api_key: SecretString::from(api_key.to_string()),
        model: model.into(),
    }
}
