//! Configuration — typed settings resolved once at process start.
//!
//! Split into:
//! - `schema` — the typed `Config` tree with defaults
//! - `loader` — environment-variable resolution on top of the defaults

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{Config, ProviderConfig, ProvidersConfig, ServerConfig};
