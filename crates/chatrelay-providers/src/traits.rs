//! Provider capability contract — the core abstraction of the gateway.
//!
//! Every backing model service (OpenAI, Anthropic, Gemini) implements
//! [`AiProvider`]. The HTTP handler is written against this trait only,
//! never against a concrete vendor.

use async_trait::async_trait;

use chatrelay_core::{ModelInfo, ProviderError};

/// Trait that all vendor adapters must implement.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Send `message` to the backing model and return the generated text.
    ///
    /// Single-turn, no system prompt, no retry. An empty vendor payload is
    /// an error, never an empty success.
    async fn generate_response(&self, message: &str) -> Result<String, ProviderError>;

    /// Static descriptor of the resolved model. No network call.
    fn model_info(&self) -> ModelInfo;
}

impl std::fmt::Debug for dyn AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AiProvider({})", self.model_info().provider)
    }
}

/// Resolves a provider name to a fresh [`AiProvider`] instance.
///
/// The handler goes through this seam instead of calling the concrete
/// factory directly, so tests can substitute mock providers.
pub trait ProviderFactory: Send + Sync {
    fn create(&self, name: &str) -> Result<Box<dyn AiProvider>, ProviderError>;
}
