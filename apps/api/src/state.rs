use std::sync::Arc;

use crate::analysis::ai::ResumeAnalyzer;
use crate::config::Config;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Where analyses are kept. Default: InMemoryAnalysisStore.
    pub store: Arc<dyn AnalysisStore>,
    /// Pluggable analyzer. LlmResumeAnalyzer when an API key is configured,
    /// DisabledAnalyzer otherwise.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub config: Config,
}
