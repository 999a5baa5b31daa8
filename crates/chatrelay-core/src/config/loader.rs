//! Config loader — resolves settings from environment variables over defaults.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. Environment variables (`AI_PROVIDER`, `PORT`, `OPENAI_API_KEY`, …)
//!
//! The result is read once at process start and passed around immutably;
//! nothing re-reads the environment after that.

use tracing::warn;

use super::schema::{Config, ProviderConfig};

/// Load configuration from defaults + environment variables.
pub fn load_config() -> Config {
    apply_overrides(Config::default(), |key| std::env::var(key).ok())
}

/// Apply overrides from a key lookup on top of a base config.
///
/// Separated from `load_config` so tests can drive it with a map instead
/// of mutating the process environment.
fn apply_overrides(mut config: Config, get: impl Fn(&str) -> Option<String>) -> Config {
    // Server
    if let Some(val) = get("API_PREFIX") {
        config.server.api_prefix = val;
    }
    if let Some(val) = get("DEBUG") {
        config.server.debug = parse_bool(&val);
    }
    if let Some(val) = get("HOST") {
        config.server.host = val;
    }
    if let Some(val) = get("PORT") {
        match val.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => warn!("Invalid PORT value '{}', keeping {}", val, config.server.port),
        }
    }
    if let Some(val) = get("CORS_ALLOWED_ORIGINS") {
        config.server.cors_allowed_origins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Provider selection
    if let Some(val) = get("AI_PROVIDER") {
        config.ai_provider = val.to_lowercase();
    }
    if let Some(val) = get("REQUEST_TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(secs) => config.request_timeout_secs = secs,
            Err(_) => warn!(
                "Invalid REQUEST_TIMEOUT_SECS value '{}', keeping {}",
                val, config.request_timeout_secs
            ),
        }
    }

    // Vendor credentials
    apply_provider_overrides(&mut config.providers.openai, "OPENAI", &get);
    apply_provider_overrides(&mut config.providers.anthropic, "ANTHROPIC", &get);
    apply_provider_overrides(&mut config.providers.gemini, "GEMINI", &get);

    config
}

/// Apply overrides for a single vendor (`<NAME>_API_KEY`, `<NAME>_API_BASE`).
fn apply_provider_overrides(
    provider: &mut ProviderConfig,
    name: &str,
    get: &impl Fn(&str) -> Option<String>,
) {
    if let Some(val) = get(&format!("{name}_API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = get(&format!("{name}_API_BASE")) {
        provider.api_base = Some(val);
    }
}

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
