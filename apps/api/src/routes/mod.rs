pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

/// Headroom for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/upload-resume",
            post(extraction::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/analyze-resume", post(analysis::handle_analyze_resume))
        .route("/api/analysis/:id", get(analysis::handle_get_analysis))
        .route(
            "/api/recent-analyses",
            get(analysis::handle_recent_analyses),
        )
        .with_state(state)
}
