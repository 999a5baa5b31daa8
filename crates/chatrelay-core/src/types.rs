//! Wire types for the chat endpoint and provider metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Chat envelope
// ─────────────────────────────────────────────

/// Inbound chat request body.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Outbound chat response envelope.
///
/// `timestamp` is assigned when the response is constructed, not when the
/// request arrived; `provider` always names the configured provider that
/// served the call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    pub provider: String,
}

impl ChatResponse {
    /// Wrap generated text in the response envelope, stamping it now.
    pub fn new(response: impl Into<String>, provider: impl Into<String>) -> Self {
        ChatResponse {
            response: response.into(),
            timestamp: Utc::now(),
            provider: provider.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Model metadata
// ─────────────────────────────────────────────

/// Static descriptor of a provider's model configuration.
///
/// Returned by `AiProvider::model_info` without any network call.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ModelInfo {
    pub provider: &'static str,
    pub model: &'static str,
    pub capabilities: Vec<&'static str>,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
