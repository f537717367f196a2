mod config;
mod conversion;
mod errors;
mod glossary;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::glossary::{default_glossary, GlossaryStore, InMemoryGlossaryStore, RedisGlossaryStore};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting civvy API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize glossary store (Redis hash, or process memory without REDIS_URL)
    let glossary: Arc<dyn GlossaryStore> = if config.redis_url.is_some() {
        let store = RedisGlossaryStore::new(config.glossary_config());
        if store.is_configured() {
            info!("Glossary store: Redis hash '{}'", config.glossary_key);
        } else {
            warn!("REDIS_URL unusable; glossary running on the built-in list, writes disabled");
        }
        Arc::new(store)
    } else {
        warn!("REDIS_URL not set; glossary kept in process memory, seeded with the built-in list");
        Arc::new(InMemoryGlossaryStore::seeded(default_glossary()))
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone(), config.llm_timeout)?;
    info!(
        "LLM client initialized (model: {}, timeout: {:?})",
        llm_client::MODEL,
        config.llm_timeout
    );

    if config.admin_password.is_none() {
        warn!("ADMIN_PASSWORD not set; glossary admin endpoints will reject every call");
    }

    // Build app state
    let state = AppState {
        glossary,
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed domain

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
