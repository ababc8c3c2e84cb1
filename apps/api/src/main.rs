mod config;
mod errors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use resume_scorer::{EngineConfig, ResumeEngine};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "resume_scorer={level},tower_http={level}",
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume scorer v{}", env!("CARGO_PKG_VERSION"));

    // Engine tables: built-in unless a file replaces them. Any problem is fatal here.
    let engine_config = match &config.engine_config_path {
        Some(path) => {
            info!("Loading engine config from {path}");
            EngineConfig::from_json_file(path)
                .with_context(|| format!("Invalid engine config at '{path}'"))?
        }
        None => EngineConfig::default(),
    };
    let engine = ResumeEngine::new(engine_config).context("Failed to build resume engine")?;
    info!(
        "Engine ready: {} sections, critical {:?}",
        engine.config().sections.known.len(),
        engine.config().sections.critical
    );

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
