//! Configuration schema — typed settings for the gateway.
//!
//! Hierarchy: `Config` → `ServerConfig`, `ProvidersConfig`.
//! Loaded once at startup (see `loader`), never mutated afterwards, and
//! passed explicitly into the factory and the HTTP handlers.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — defaults overridden by environment variables.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Which provider the factory resolves for every chat call.
    pub ai_provider: String,
    pub providers: ProvidersConfig,
    /// Timeout for the outbound vendor call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ai_provider: "gemini".to_string(),
            providers: ProvidersConfig::default(),
            request_timeout_secs: 120,
        }
    }
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Route prefix for all endpoints (e.g. `/api`).
    pub api_prefix: String,
    /// Verbose logging.
    pub debug: bool,
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Origins allowed for cross-origin requests.
    ///
    /// Empty means no CORS layer is mounted; a single `"*"` entry allows
    /// any origin (the reference behavior, now opt-in).
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// The `host:port` pair to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Per-vendor credentials and endpoint overrides.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub gemini: ProviderConfig,
}

/// Configuration for a single vendor (API key, base URL override).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Custom API base URL (overrides the vendor default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Whether this vendor has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let config = Config::default();
        assert_eq!(config.ai_provider, "gemini");
        assert_eq!(config.server.api_prefix, "/api");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert!(!config.server.debug);
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_bind_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_provider_is_configured() {
        let mut provider = ProviderConfig::default();
        assert!(!provider.is_configured());
        provider.api_key = "sk-test".to_string();
        assert!(provider.is_configured());
    }

    #[test]
    fn test_cors_disabled_by_default() {
        assert!(Config::default().server.cors_allowed_origins.is_empty());
    }
}
