//! Engine configuration.
//!
//! Deserialized from `config.toml` by the infra loader; every field has a
//! default so a missing or partial file still yields a working engine.

use serde::{Deserialize, Serialize};

use crate::calendar::TariffCalendar;

/// Pricing constants applied to every quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Tax applied on the subtotal.
    pub tax_rate: f64,
    /// Standing promotional discount applied on the taxed total.
    pub promo_discount: f64,
    /// Share of the discounted total requested as deposit.
    pub deposit_share: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: 0.10,
            promo_discount: 0.25,
            deposit_share: 0.50,
        }
    }
}

/// Fixed sampling parameters for the generation provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.7,
            presence_penalty: 0.6,
            frequency_penalty: 0.5,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of user/assistant exchanges kept per session; the raw message
    /// list is capped at twice this value.
    pub context_window: usize,
    /// Response cache entry bound.
    pub cache_capacity: usize,
    /// Response cache TTL in seconds.
    pub cache_ttl_secs: u64,
    /// Operator-authored instructions appended to the generation prompt.
    pub custom_instructions: String,
    pub pricing: PricingPolicy,
    pub sampling: SamplingParams,
    pub calendar: TariffCalendar,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EngineConfig {
    /// Defaults used when no `config.toml` is present.
    pub fn builtin() -> Self {
        Self {
            context_window: 10,
            cache_capacity: 100,
            cache_ttl_secs: 300,
            custom_instructions: String::new(),
            pricing: PricingPolicy::default(),
            sampling: SamplingParams::default(),
            calendar: TariffCalendar::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_defaults() {
        let config = EngineConfig::builtin();
        assert_eq!(config.context_window, 10);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.cache_ttl_secs, 300);
        assert_eq!(config.pricing.tax_rate, 0.10);
        assert_eq!(config.pricing.promo_discount, 0.25);
        assert_eq!(config.sampling.max_tokens, 500);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            cache_capacity = 50

            [pricing]
            tax_rate = 0.18
            "#,
        )
        .unwrap();
        assert_eq!(config.cache_capacity, 50);
        assert_eq!(config.pricing.tax_rate, 0.18);
        assert_eq!(config.pricing.promo_discount, 0.25);
    }
}
