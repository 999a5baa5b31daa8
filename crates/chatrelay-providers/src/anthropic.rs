//! Anthropic adapter — direct client for the Messages API.
//!
//! The Messages API differs from the chat completions shape:
//! - authentication uses `x-api-key` plus an `anthropic-version` header
//! - `max_tokens` is required on every request
//! - response content is an array of typed content blocks
//!
//! A single-turn user message is sent with the reference defaults
//! (`max_tokens` 1024, `temperature` 0.7); the first text block is the
//! generated response.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chatrelay_core::config::ProviderConfig;
use chatrelay_core::{ModelInfo, ProviderError};

use crate::classify::{classify_status, classify_transport};
use crate::traits::AiProvider;

const PROVIDER: &str = "anthropic";
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Anthropic Messages API client. Constructed fresh per request.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: &'static str,
}

// ─────────────────────────────────────────────
// Wire types (Messages API format)
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

// ─────────────────────────────────────────────
// Implementation
// ─────────────────────────────────────────────

impl AnthropicProvider {
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Initialization {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        Ok(AnthropicProvider {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: config.api_key.clone(),
            model: DEFAULT_MODEL,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn generate_response(&self, message: &str) -> Result<String, ProviderError> {
        let body = ApiRequest {
            model: self.model,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![ApiMessage {
                role: "user",
                content: message,
            }],
        };

        debug!(provider = PROVIDER, model = self.model, "calling vendor API");

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(PROVIDER, status, &body));
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| ProviderError::Upstream {
            provider: PROVIDER,
            message: format!("failed to parse response: {e}"),
        })?;

        parsed
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } if !text.is_empty() => Some(text),
                _ => None,
            })
            .ok_or(ProviderError::EmptyResponse(PROVIDER))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: PROVIDER,
            model: DEFAULT_MODEL,
            capabilities: vec!["chat", "text_generation", "analysis"],
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
