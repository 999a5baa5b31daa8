//! HTTP surface — the chat endpoint and the error boundary.
//!
//! The handler owns no business logic: it resolves the configured provider
//! through the factory seam, awaits the single vendor call, and wraps the
//! result in the response envelope. Every [`ProviderError`] is translated
//! here into an HTTP status plus a `{"detail": …}` body.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use chatrelay_core::{ChatRequest, ChatResponse, ModelInfo, ProviderError};
use chatrelay_providers::ProviderFactory;

// ─────────────────────────────────────────────
// State
// ─────────────────────────────────────────────

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    /// The configured provider name, resolved per request via the factory.
    pub provider_name: String,
    pub factory: Arc<dyn ProviderFactory>,
}

/// Build the application router, nesting all routes under `api_prefix`.
pub fn build_router(api_prefix: &str, state: AppState) -> Router {
    let api = Router::new()
        .route("/chat", post(chat))
        .route("/model", get(model_info))
        .with_state(state);

    match api_prefix.trim_end_matches('/') {
        "" => api,
        prefix => Router::new().nest(prefix, api),
    }
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

/// `POST /chat` — dispatch one message to the configured provider.
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    let provider = state.factory.create(&state.provider_name)?;
    let text = provider.generate_response(&request.message).await?;

    info!(provider = %state.provider_name, chars = text.len(), "chat completed");
    Ok(Json(ChatResponse::new(text, state.provider_name.clone())))
}

/// `GET /model` — static metadata for the configured provider. No network call.
async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfo>, ApiError> {
    let provider = state.factory.create(&state.provider_name)?;
    Ok(Json(provider.model_info()))
}

// ─────────────────────────────────────────────
// Error boundary
// ─────────────────────────────────────────────

/// A failure translated for the HTTP client: status code + detail message.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = %status, "provider call failed: {err}");
        }
        ApiError {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "detail": self.detail }));
        (self.status, body).into_response()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
