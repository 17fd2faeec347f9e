mod analysis;
mod config;
mod errors;
mod ingestion;
mod llm_client;
mod routes;
mod search;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingestion::rasterize::PdftoppmRasterizer;
use crate::ingestion::store::ResumeStore;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::search::client::TavilyClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResAi API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model gateway
    let gemini = GeminiClient::new(&config)?;
    info!("Model gateway initialized (model: {})", gemini.model());

    // Initialize search client; a missing key only disables search
    let tavily = TavilyClient::new(&config)?;
    if config.tavily_api_key.is_none() {
        warn!("TAVILY_API_KEY is not set; job search will report a configuration error");
    }

    let rasterizer = PdftoppmRasterizer::new(
        config.pdftoppm_path.clone(),
        config.raster_dpi,
        Duration::from_secs(config.raster_timeout_secs),
    );
    info!(
        "Rasterizer: {} at {} dpi, text source: {}",
        config.pdftoppm_path, config.raster_dpi, config.text_source
    );

    // Build app state
    let state = AppState {
        gateway: Arc::new(gemini),
        rasterizer: Arc::new(rasterizer),
        search: Arc::new(tavily),
        resumes: ResumeStore::new(config.session_capacity),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
