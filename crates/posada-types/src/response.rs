//! Routed response types.
//!
//! Every path through the router terminates in a `RouteResponse` carrying an
//! explicit `source` discriminant, so callers can always tell a scripted
//! reply from a generated one or a degraded fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tier produced a routed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSource {
    /// A trigger-matched operator script.
    Script,
    /// The booking pipeline, trained Q&A, or the generation provider.
    Ai,
    /// The designated error-fallback script, used after a provider failure.
    FallbackScript,
    /// The static apology of last resort.
    ErrorHandler,
}

impl fmt::Display for ResponseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSource::Script => write!(f, "script"),
            ResponseSource::Ai => write!(f, "ai"),
            ResponseSource::FallbackScript => write!(f, "fallback_script"),
            ResponseSource::ErrorHandler => write!(f, "error_handler"),
        }
    }
}

/// The router's terminal output for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub success: bool,
    pub response: String,
    pub source: ResponseSource,
}

impl RouteResponse {
    /// A successful response from the given source.
    pub fn ok(response: impl Into<String>, source: ResponseSource) -> Self {
        Self {
            success: true,
            response: response.into(),
            source,
        }
    }

    /// A degraded response from a failure-handling source.
    pub fn degraded(response: impl Into<String>, source: ResponseSource) -> Self {
        Self {
            success: false,
            response: response.into(),
            source,
        }
    }
}
