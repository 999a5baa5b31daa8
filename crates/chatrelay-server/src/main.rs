//! Chatrelay — HTTP gateway dispatching chat requests to a configured
//! LLM provider (OpenAI, Anthropic, or Gemini).
//!
//! Startup sequence:
//! 1. Parse CLI flags
//! 2. Load config (defaults + environment)
//! 3. Build the router and optional CORS layer
//! 4. Serve until Ctrl+C

mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use clap::Parser;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use chatrelay_core::{load_config, Config};
use chatrelay_providers::VendorFactory;

use crate::routes::{build_router, AppState};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Chat gateway for OpenAI / Anthropic / Gemini backends.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
struct Cli {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(cli.logs || config.server.debug);

    run(config).await
}

async fn run(config: Config) -> Result<()> {
    let addr = config.server.bind_addr();
    let cors = cors_layer(&config.server.cors_allowed_origins)?;

    let state = AppState {
        provider_name: config.ai_provider.clone(),
        factory: Arc::new(VendorFactory::new(config.clone())),
    };

    let mut app = build_router(&config.server.api_prefix, state);
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %addr,
        provider = %config.ai_provider,
        prefix = %config.server.api_prefix,
        "gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received Ctrl+C, shutting down");
}

// ─────────────────────────────────────────────
// CORS
// ─────────────────────────────────────────────

/// Build the CORS layer from the configured origin list.
///
/// Empty list: no layer (no cross-origin allowance). A single `"*"` entry
/// restores the reference's wildcard behavior, now explicitly opt-in.
fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    let layer = if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("invalid CORS origin: {o}"))
            })
            .collect::<Result<_>>()?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    Ok(Some(layer))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("chatrelay=debug,info")
    } else {
        EnvFilter::new("chatrelay=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
