//! OpenAI adapter — direct client for the chat completions API.
//!
//! Builds a single-turn request (one user message, no system prompt),
//! calls `POST {base}/chat/completions` exactly once, and extracts the
//! first choice's message text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chatrelay_core::config::ProviderConfig;
use chatrelay_core::{ModelInfo, ProviderError};

use crate::classify::{classify_status, classify_transport};
use crate::traits::AiProvider;

const PROVIDER: &str = "openai";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI chat completions client. Constructed fresh per request.
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: &'static str,
}

// ─────────────────────────────────────────────
// Wire types (chat completions format)
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
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
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────
// Implementation
// ─────────────────────────────────────────────

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Initialization {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        Ok(OpenAiProvider {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: config.api_key.clone(),
            model: DEFAULT_MODEL,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn generate_response(&self, message: &str) -> Result<String, ProviderError> {
        let body = ApiRequest {
            model: self.model,
            messages: vec![ApiMessage {
                role: "user",
                content: message,
            }],
        };

        debug!(provider = PROVIDER, model = self.model, "calling vendor API");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
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
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::EmptyResponse(PROVIDER))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: PROVIDER,
            model: DEFAULT_MODEL,
            capabilities: vec!["chat", "streaming", "function_calling"],
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
