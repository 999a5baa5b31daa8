//! LLM vendor adapters for Chatrelay.
//!
//! # Architecture
//!
//! - [`traits::AiProvider`] — capability contract every vendor adapter implements
//! - [`traits::ProviderFactory`] — the seam the HTTP handler resolves providers through
//! - [`factory`] — name → constructor mapping over the registered set
//! - [`openai`] / [`anthropic`] / [`gemini`] — one direct HTTP client per vendor

pub mod anthropic;
pub mod factory;
pub mod gemini;
pub mod openai;
pub mod traits;

mod classify;

pub use factory::{create_provider, VendorFactory, REGISTERED_PROVIDERS};
pub use traits::{AiProvider, ProviderFactory};
