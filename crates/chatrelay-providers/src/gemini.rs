//! Gemini adapter — direct client for the generateContent API.
//!
//! Wire format notes:
//! - the model name is part of the URL path, not the body
//! - JSON keys are camelCase (`generationConfig`, `maxOutputTokens`)
//! - generated text lives in `candidates[0].content.parts[*].text`
//!
//! The reference defaults are preserved: temperature 0.7, topP 0.8,
//! topK 40, maxOutputTokens 2048. Each request is single-turn; a fresh
//! adapter per call means no vendor-side chat history ever accumulates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chatrelay_core::config::ProviderConfig;
use chatrelay_core::{ModelInfo, ProviderError};

use crate::classify::{classify_status, classify_transport};
use crate::traits::AiProvider;

const PROVIDER: &str = "gemini";
const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TOP_P: f64 = 0.8;
const DEFAULT_TOP_K: i32 = 40;
const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 2048;

/// Gemini generateContent client. Constructed fresh per request.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: &'static str,
}

// ─────────────────────────────────────────────
// Wire types (generateContent format, camelCase)
// ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: i32,
    max_output_tokens: i32,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

// ─────────────────────────────────────────────
// Implementation
// ─────────────────────────────────────────────

impl GeminiProvider {
    pub fn new(config: &ProviderConfig, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::Initialization {
                provider: PROVIDER,
                reason: e.to_string(),
            })?;

        Ok(GeminiProvider {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: config.api_key.clone(),
            model: DEFAULT_MODEL,
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn generate_response(&self, message: &str) -> Result<String, ProviderError> {
        let body = ApiRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: message }],
            }],
            generation_config: GenerationConfig {
                temperature: DEFAULT_TEMPERATURE,
                top_p: DEFAULT_TOP_P,
                top_k: DEFAULT_TOP_K,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            },
        };

        debug!(provider = PROVIDER, model = self.model, "calling vendor API");

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
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
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|content| {
                content
                    .parts
                    .into_iter()
                    .find_map(|part| part.text.filter(|t| !t.is_empty()))
            })
            .ok_or(ProviderError::EmptyResponse(PROVIDER))
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo {
            provider: PROVIDER,
            model: DEFAULT_MODEL,
            capabilities: vec!["chat", "text_generation", "analysis", "code_generation"],
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_provider(api_key: &str, api_base: &str) -> GeminiProvider {
        let config = ProviderConfig {
            api_key: api_key.to_string(),
            api_base: Some(api_base.to_string()),
        };
        GeminiProvider::new(&config, 120).unwrap()
    }

    #[test]
    fn test_generate_url_includes_model() {
        let provider = make_provider("key", "http://localhost:9");
        assert_eq!(
            provider.generate_url(),
            "http://localhost:9/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_model_info_is_static() {
        let provider = make_provider("key", "http://localhost:9");
        let info = provider.model_info();
        assert_eq!(info.provider, "gemini");
        assert_eq!(info.model, "gemini-pro");
        assert!(info.capabilities.contains(&"code_generation"));
    }

    #[tokio::test]
    async fn test_generate_response_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(header("x-goog-api-key", "gm-test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [{"text": "Hello"}]
                }],
                "generationConfig": {
                    "temperature": 0.7,
                    "topP": 0.8,
                    "topK": 40,
                    "maxOutputTokens": 2048
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "Hello from Gemini!" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("gm-test-key", &mock_server.uri());
        let text = provider.generate_response("Hello").await.unwrap();
        assert_eq!(text, "Hello from Gemini!");
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("bad", &mock_server.uri());
        let err = provider.generate_response("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unauthorized("gemini")));
    }

    #[tokio::test]
    async fn test_quota_exceeded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("key", &mock_server.uri());
        let err = provider.generate_response("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited("gemini")));
        assert_eq!(err.status_code(), 429);
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        let provider = make_provider("key", "http://127.0.0.1:1");
        let err = provider.generate_response("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable("gemini")));
    }

    #[tokio::test]
    async fn test_no_candidates_is_an_error() {
        let mock_server = MockServer::start().await;

        // Safety-blocked prompts come back with no candidates
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("key", &mock_server.uri());
        let err = provider.generate_response("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse("gemini")));
    }

    #[tokio::test]
    async fn test_empty_part_text_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": "" }] } }]
            })))
            .mount(&mock_server)
            .await;

        let provider = make_provider("key", &mock_server.uri());
        let err = provider.generate_response("Hello").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse("gemini")));
    }
}
