//! Provider factory — maps a configured name to a fresh vendor adapter.
//!
//! A new adapter (and thus a fresh vendor client) is constructed on every
//! call; nothing is cached or pooled. A consequence worth knowing: any
//! conversational state a vendor client could hold resets on every request.

use tracing::debug;

use chatrelay_core::{Config, ProviderError};

use crate::anthropic::AnthropicProvider;
use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::traits::{AiProvider, ProviderFactory};

/// The fixed set of provider names the factory accepts.
pub const REGISTERED_PROVIDERS: &[&str] = &["openai", "anthropic", "gemini"];

/// Construct a new provider instance for `name`.
///
/// Unknown names fail with [`ProviderError::UnknownProvider`] so the caller
/// can map them to a client-facing 4xx; client-construction failures surface
/// as [`ProviderError::Initialization`] instead of panicking.
pub fn create_provider(
    name: &str,
    config: &Config,
) -> Result<Box<dyn AiProvider>, ProviderError> {
    debug!(provider = name, "creating provider");
    let timeout = config.request_timeout_secs;
    match name {
        "openai" => Ok(Box::new(OpenAiProvider::new(
            &config.providers.openai,
            timeout,
        )?)),
        "anthropic" => Ok(Box::new(AnthropicProvider::new(
            &config.providers.anthropic,
            timeout,
        )?)),
        "gemini" => Ok(Box::new(GeminiProvider::new(
            &config.providers.gemini,
            timeout,
        )?)),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

/// The production [`ProviderFactory`]: resolves names against the real
/// vendor adapters using the process-wide configuration.
pub struct VendorFactory {
    config: Config,
}

impl VendorFactory {
    pub fn new(config: Config) -> Self {
        VendorFactory { config }
    }
}

impl ProviderFactory for VendorFactory {
    fn create(&self, name: &str) -> Result<Box<dyn AiProvider>, ProviderError> {
        create_provider(name, &self.config)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
