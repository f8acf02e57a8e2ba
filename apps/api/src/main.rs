mod config;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod report;
mod resume;
mod routes;
mod scrape;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scrape::JobScraper;
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

    info!("Starting interview-prep API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_url.clone(),
        config.openai_api_key.clone(),
        config.llm_model.clone(),
        config.llm_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize job scraper
    let scraper = JobScraper::new(config.scrape_timeout)?;

    if !config.resume_dir.is_dir() {
        warn!(
            "Resume directory {} does not exist; resume requests will fail until it is created",
            config.resume_dir.display()
        );
    }
    info!(
        "Artifacts: job analyses in {}, reports in {}",
        config.job_desc_dir.display(),
        config.report_dir.display()
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        scraper,
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
