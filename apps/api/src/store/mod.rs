//! Analysis storage: an injected, swappable keyed store.
//!
//! Only an in-memory backend exists; records live for the process lifetime
//! with no deletion and no eviction.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::analysis::{NewAnalysis, ResumeAnalysis};

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Stores a new analysis, assigning its id and creation time.
    async fn put(&self, analysis: NewAnalysis) -> Result<ResumeAnalysis>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeAnalysis>>;

    /// Newest first, at most `limit` records.
    async fn recent(&self, limit: usize) -> Result<Vec<ResumeAnalysis>>;
}

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, (u64, ResumeAnalysis)>,
    next_seq: u64,
}

/// `RwLock<HashMap>` backend. The insertion sequence breaks ties between
/// records created within the same clock tick.
#[derive(Default)]
pub struct InMemoryAnalysisStore {
    inner: RwLock<Inner>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn put(&self, analysis: NewAnalysis) -> Result<ResumeAnalysis> {
        let record = ResumeAnalysis {
            id: Uuid::new_v4(),
            resume_text: analysis.resume_text,
            job_description: analysis.job_description,
            overall_score: analysis.overall_score,
            feedback: analysis.feedback,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(record.id, (seq, record.clone()));
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeAnalysis>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&id).map(|(_, record)| record.clone()))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ResumeAnalysis>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&(u64, ResumeAnalysis)> = inner.records.values().collect();
        entries.sort_by(|a, b| {
            b.1.created_at
                .cmp(&a.1.created_at)
                .then_with(|| b.0.cmp(&a.0))
        });
        Ok(entries
            .into_iter()
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::heuristic::analyze_heuristically;

    fn new_analysis(text: &str) -> NewAnalysis {
        let outcome = analyze_heuristically(text);
        NewAnalysis {
            resume_text: text.to_string(),
            job_description: None,
            overall_score: outcome.overall_score,
            feedback: outcome.feedback,
        }
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = InMemoryAnalysisStore::new();
        let stored = store.put(new_analysis("first resume")).await.unwrap();
        let fetched = store.get(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert_eq!(fetched.resume_text, "first resume");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = InMemoryAnalysisStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let store = InMemoryAnalysisStore::new();
        for i in 0..5 {
            store.put(new_analysis(&format!("resume {i}"))).await.unwrap();
        }

        let recent = store.recent(3).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|r| r.resume_text.as_str()).collect();
        assert_eq!(texts, vec!["resume 4", "resume 3", "resume 2"]);
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_recent_with_large_limit_returns_all() {
        let store = InMemoryAnalysisStore::new();
        store.put(new_analysis("only")).await.unwrap();
        assert_eq!(store.recent(50).await.unwrap().len(), 1);
        assert!(store.recent(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = InMemoryAnalysisStore::new();
        let a = store.put(new_analysis("a")).await.unwrap();
        let b = store.put(new_analysis("a")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
