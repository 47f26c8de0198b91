mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ai::{DisabledAnalyzer, LlmResumeAnalyzer, ResumeAnalyzer};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::InMemoryAnalysisStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analysis API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config)?;

    // Records live for the process lifetime only
    let store = Arc::new(InMemoryAnalysisStore::new());

    let state = AppState {
        store,
        analyzer,
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

/// Uses the LLM analyzer when an API key is configured; otherwise every
/// request is served by the heuristic fallback.
fn build_analyzer(config: &Config) -> Result<Arc<dyn ResumeAnalyzer>> {
    match &config.openai_api_key {
        Some(api_key) => {
            let llm = LlmClient::new(
                api_key.clone(),
                &config.openai_base_url,
                config.openai_model.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!("LLM client initialized (model: {})", llm.model());
            Ok(Arc::new(LlmResumeAnalyzer::new(llm)))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; all analyses will use the heuristic fallback");
            Ok(Arc::new(DisabledAnalyzer))
        }
    }
}
