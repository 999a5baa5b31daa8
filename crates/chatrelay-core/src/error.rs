//! Error taxonomy shared by the factory, the vendor adapters, and the
//! HTTP boundary.
//!
//! Every failure inside a provider adapter or the factory becomes one of
//! these variants; the server maps each variant to an HTTP status and a
//! `{"detail": …}` body. Nothing is retried and nothing is swallowed —
//! an unclassified vendor failure surfaces as [`ProviderError::Upstream`].

use thiserror::Error;

/// Everything that can go wrong between "request accepted" and "vendor
/// text extracted".
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configured provider name is not in the registered set.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// Vendor client construction failed (before any network call).
    #[error("failed to initialize {provider} client: {reason}")]
    Initialization { provider: &'static str, reason: String },

    /// The vendor rejected the credential.
    #[error("invalid API key for {0}. Please check your configuration.")]
    Unauthorized(&'static str),

    /// The vendor reported a rate-limit or quota problem.
    #[error("rate limit exceeded for {0}. Please try again later.")]
    RateLimited(&'static str),

    /// The vendor could not be reached (connect failure or timeout).
    #[error("failed to connect to {0} API. Please try again later.")]
    Unavailable(&'static str),

    /// The vendor answered 200 but with no usable text.
    #[error("empty response from {0} API")]
    EmptyResponse(&'static str),

    /// Any other vendor failure, carrying the vendor's message text.
    #[error("{provider} API error: {message}")]
    Upstream { provider: &'static str, message: String },
}

impl ProviderError {
    /// The HTTP status this error maps to at the server boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            ProviderError::UnknownProvider(_) => 400,
            ProviderError::Unauthorized(_) => 401,
            ProviderError::RateLimited(_) => 429,
            ProviderError::Unavailable(_) => 503,
            ProviderError::Initialization { .. }
            | ProviderError::EmptyResponse(_)
            | ProviderError::Upstream { .. } => 500,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
