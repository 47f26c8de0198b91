//! AI Analyzer: pluggable, trait-based resume analysis backed by an external model.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`. Errors from any backend are
//! recoverable: the analyze handler substitutes the heuristic result.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::analysis::prompts::{
    ANALYSIS_SYSTEM_TEMPLATE, ANALYSIS_USER_TEMPLATE, GENERAL_CONTEXT, TARGETED_CONTEXT_TEMPLATE,
};
use crate::analysis::schema::RawAnalysis;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::AnalysisOutcome;

/// Failure of the external analysis service. Never shown to end users.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("AI analyzer is not configured")]
    NotConfigured,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Invalid response structure from AI service: {0}")]
    InvalidResponse(String),
}

/// Implement this to swap analysis backends without touching the handler.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisOutcome, AnalyzerError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmResumeAnalyzer: default when an API key is configured
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmResumeAnalyzer {
    llm: LlmClient,
}

impl LlmResumeAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: Option<&str>,
    ) -> Result<AnalysisOutcome, AnalyzerError> {
        let system = build_system_prompt(job_description);
        let prompt = ANALYSIS_USER_TEMPLATE.replace("{resume_text}", resume_text);

        let raw: RawAnalysis = self.llm.call_json(&prompt, &system).await?;
        let outcome = raw.validate().map_err(AnalyzerError::InvalidResponse)?;

        debug!(
            overall_score = outcome.overall_score,
            targeted = job_description.is_some(),
            "AI analysis accepted"
        );
        Ok(outcome)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DisabledAnalyzer: without an API key every request takes the heuristic path
// ────────────────────────────────────────────────────────────────────────────

pub struct DisabledAnalyzer;

#[async_trait]
impl ResumeAnalyzer for DisabledAnalyzer {
    async fn analyze(
        &self,
        _resume_text: &str,
        _job_description: Option<&str>,
    ) -> Result<AnalysisOutcome, AnalyzerError> {
        Err(AnalyzerError::NotConfigured)
    }
}

fn build_system_prompt(job_description: Option<&str>) -> String {
    let job_context = match job_description {
        Some(jd) => TARGETED_CONTEXT_TEMPLATE.replace("{job_description}", jd),
        None => GENERAL_CONTEXT.to_string(),
    };
    format!(
        "{}\n\n{JSON_ONLY_SYSTEM}",
        ANALYSIS_SYSTEM_TEMPLATE.replace("{job_context}", &job_context)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_targets_job_description() {
        let prompt = build_system_prompt(Some("Staff Rust Engineer at Acme"));
        assert!(prompt.contains("Staff Rust Engineer at Acme"));
        assert!(!prompt.contains(GENERAL_CONTEXT));
        assert!(!prompt.contains("{job_context}"));
    }

    #[test]
    fn test_system_prompt_without_job_description_is_general() {
        let prompt = build_system_prompt(None);
        assert!(prompt.contains(GENERAL_CONTEXT));
        assert!(prompt.contains("\"overallScore\""));
        assert!(prompt.ends_with(JSON_ONLY_SYSTEM));
    }

    #[tokio::test]
    async fn test_disabled_analyzer_always_fails() {
        let err = DisabledAnalyzer
            .analyze("resume text", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::NotConfigured));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_analyzer_error() {
        let llm = LlmClient::new(
            "sk-test".to_string(),
            "http://127.0.0.1:9",
            "gpt-4o".to_string(),
            std::time::Duration::from_secs(2),
        )
        .unwrap();
        let err = LlmResumeAnalyzer::new(llm)
            .analyze("resume text", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Llm(LlmError::Http(_))));
    }
}
