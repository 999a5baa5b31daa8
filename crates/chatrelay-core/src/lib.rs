//! Core types, configuration, and error taxonomy for Chatrelay.
//!
//! # Architecture
//!
//! - [`config`] — typed settings loaded once at startup from the environment
//! - [`error`] — the [`error::ProviderError`] taxonomy shared by the factory,
//!   the vendor adapters, and the HTTP boundary
//! - [`types`] — the chat request/response envelope and model metadata

pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, Config};
pub use error::ProviderError;
pub use types::{ChatRequest, ChatResponse, ModelInfo};
