//! Shared failure classification for vendor calls.
//!
//! All three adapters fail the same four ways: bad credential, rate limit,
//! unreachable vendor, and everything else. Classification is driven by the
//! structured information reqwest exposes (error kind, HTTP status), not by
//! substring matching on message text.

use reqwest::StatusCode;

use chatrelay_core::ProviderError;

/// Classify a transport-level failure (the request never got a response).
pub(crate) fn classify_transport(provider: &'static str, err: reqwest::Error) -> ProviderError {
    if err.is_connect() || err.is_timeout() {
        ProviderError::Unavailable(provider)
    } else {
        ProviderError::Upstream {
            provider,
            message: err.to_string(),
        }
    }
}

/// Classify a non-success HTTP response from a vendor.
pub(crate) fn classify_status(
    provider: &'static str,
    status: StatusCode,
    body: &str,
) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Unauthorized(provider),
        429 => ProviderError::RateLimited(provider),
        _ => ProviderError::Upstream {
            provider,
            message: match extract_error_message(body) {
                Some(msg) => format!("HTTP {}: {}", status.as_u16(), msg),
                None => format!("HTTP {}: {}", status.as_u16(), body),
            },
        },
    }
}

/// Pull the human-readable message out of a vendor error body.
///
/// OpenAI, Anthropic, and Gemini all wrap failures as
/// `{"error": {"message": …}}`; fall back to the raw body otherwise.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(String::from)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_statuses() {
        for code in [401, 403] {
            let err = classify_status("openai", StatusCode::from_u16(code).unwrap(), "{}");
            assert!(matches!(err, ProviderError::Unauthorized("openai")));
        }
    }

    #[test]
    fn test_rate_limited_status() {
        let err = classify_status("gemini", StatusCode::TOO_MANY_REQUESTS, "{}");
        assert!(matches!(err, ProviderError::RateLimited("gemini")));
    }

    #[test]
    fn test_other_status_carries_vendor_message() {
        let body = r#"{"error": {"message": "model overloaded", "type": "server_error"}}"#;
        let err = classify_status("anthropic", StatusCode::INTERNAL_SERVER_ERROR, body);
        match err {
            ProviderError::Upstream { provider, message } => {
                assert_eq!(provider, "anthropic");
                assert!(message.contains("HTTP 500"));
                assert!(message.contains("model overloaded"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_body_falls_back_to_raw_text() {
        let err = classify_status("openai", StatusCode::BAD_GATEWAY, "<html>oops</html>");
        match err {
            ProviderError::Upstream { message, .. } => {
                assert!(message.contains("<html>oops</html>"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }
}
