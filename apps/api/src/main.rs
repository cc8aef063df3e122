mod chat;
mod config;
mod documents;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod source;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::ExtractOptions;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::source::{HttpFetcher, PdfExtractBackend};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Shared HTTP client for Gemini and remote document fetches
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")?;

    // Initialize LLM client
    let llm = LlmClient::new(http.clone(), config.gemini_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let extract_options = ExtractOptions {
        line_tolerance: config.line_tolerance,
        ..ExtractOptions::default()
    };
    info!(
        "Extraction: line tolerance {}pt, upload limit {} bytes",
        extract_options.line_tolerance, config.max_upload_bytes
    );

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        backend: Arc::new(PdfExtractBackend),
        fetcher: Arc::new(HttpFetcher::new(http, config.max_upload_bytes)),
        extract_options,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
