//! Axum route handlers for the Analysis API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::analysis::heuristic::analyze_heuristically;
use crate::analysis::validation::{invalid_body, AnalyzeRequest};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisFeedback, NewAnalysis, ResumeAnalysis};
use crate::state::AppState;

const DEFAULT_RECENT_LIMIT: usize = 10;
const MAX_RECENT_LIMIT: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub id: Uuid,
    pub overall_score: u32,
    pub feedback: AnalysisFeedback,
    pub created_at: DateTime<Utc>,
    /// True when the heuristic fallback produced the result.
    pub is_demo: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Kept as a string so an unparsable value falls back to the default.
    pub limit: Option<String>,
}

impl RecentQuery {
    fn effective_limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(leading_integer)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .min(MAX_RECENT_LIMIT)
    }
}

/// Reads the leading integer of `raw` the lenient way query strings are
/// usually treated: `"3abc"` is 3, `"5.5"` is 5, `"abc"` is nothing.
/// Negative values yield `Some(0)`; runs too long for `usize` saturate.
fn leading_integer(raw: &str) -> Option<usize> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    if negative {
        return Some(0);
    }
    Some(digits.parse().unwrap_or(usize::MAX))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze-resume
///
/// Runs the AI analyzer once; on any failure substitutes the heuristic result
/// and marks the response `isDemo`. The result is stored either way.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| invalid_body(rejection.body_text()))?;
    let request = request.validate()?;

    let (outcome, is_demo) = match state
        .analyzer
        .analyze(&request.resume_text, request.job_description.as_deref())
        .await
    {
        Ok(outcome) => (outcome, false),
        Err(e) => {
            warn!("AI analysis failed, falling back to heuristic analysis: {e}");
            (analyze_heuristically(&request.resume_text), true)
        }
    };

    let stored = state
        .store
        .put(NewAnalysis {
            resume_text: request.resume_text,
            job_description: request.job_description,
            overall_score: outcome.overall_score,
            feedback: outcome.feedback,
        })
        .await?;

    info!(
        analysis_id = %stored.id,
        overall_score = stored.overall_score,
        is_demo,
        "Resume analysis stored"
    );

    Ok(Json(AnalyzeResponse {
        id: stored.id,
        overall_score: stored.overall_score,
        feedback: stored.feedback,
        created_at: stored.created_at,
        is_demo,
    }))
}

/// GET /api/analysis/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let not_found = || AppError::NotFound("Analysis not found".to_string());

    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let analysis = state.store.get(id).await?.ok_or_else(not_found)?;
    Ok(Json(analysis))
}

/// GET /api/recent-analyses?limit=N
///
/// Newest first. `limit` defaults to 10 and is capped at 50.
pub async fn handle_recent_analyses(
    State(state): State<AppState>,
    query: Result<Query<RecentQuery>, QueryRejection>,
) -> Result<Json<Vec<ResumeAnalysis>>, AppError> {
    let query = query.map(|Query(query)| query).unwrap_or_else(|rejection| {
        debug!("Unreadable recent-analyses query, using default limit: {rejection}");
        RecentQuery { limit: None }
    });
    let analyses = state.store.recent(query.effective_limit()).await?;
    Ok(Json(analyses))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(raw: Option<&str>) -> usize {
        RecentQuery {
            limit: raw.map(String::from),
        }
        .effective_limit()
    }

    #[test]
    fn test_recent_limit_defaults_to_ten() {
        assert_eq!(limit(None), 10);
        assert_eq!(limit(Some("")), 10);
        assert_eq!(limit(Some("abc")), 10);
        assert_eq!(limit(Some("0")), 10);
        assert_eq!(limit(Some("-4")), 10);
    }

    #[test]
    fn test_recent_limit_is_capped() {
        assert_eq!(limit(Some("3")), 3);
        assert_eq!(limit(Some("50")), 50);
        assert_eq!(limit(Some("500")), 50);
        assert_eq!(limit(Some("99999999999999999999999")), 50);
    }

    #[test]
    fn test_recent_limit_reads_leading_digits() {
        assert_eq!(limit(Some("3abc")), 3);
        assert_eq!(limit(Some("5.5")), 5);
        assert_eq!(limit(Some(" 7")), 7);
        assert_eq!(limit(Some("+4")), 4);
        assert_eq!(limit(Some("-")), 10);
        assert_eq!(limit(Some("-0")), 10);
    }
}
