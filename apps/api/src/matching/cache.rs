//! Latest analysis run, kept so filtering never re-scores.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::matching::engine::AnalysisRequest;
use crate::matching::ranking::{filter_results, MatchResult, ResultFilter};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSnapshot {
    pub request: AnalysisRequest,
    pub results: Vec<MatchResult>,
    pub analyzed_at: DateTime<Utc>,
}

/// Filtered view over the cached ranked list.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView {
    pub results: Vec<MatchResult>,
    pub shown: usize,
    pub total: usize,
    pub requirements: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Default)]
struct CacheState {
    /// Bumped by every run start, document removal and reset.
    generation: u64,
    snapshot: Option<AnalysisSnapshot>,
}

/// Holds at most one ranked list; each run replaces the previous one whole.
///
/// A run is tagged with the generation returned by [`AnalysisCache::begin_run`]
/// and may only be stored while that generation is still current, so a run
/// that raced with a removal, a reset or a newer run is dropped.
#[derive(Clone, Default)]
pub struct AnalysisCache {
    inner: Arc<RwLock<CacheState>>,
}

impl AnalysisCache {
    /// Starts a run. Call before taking the document snapshot it will score.
    pub async fn begin_run(&self) -> u64 {
        let mut state = self.inner.write().await;
        state.generation += 1;
        state.generation
    }

    /// Stores the run's results. Returns `false` (and stores nothing) when the
    /// run has been superseded since `begin_run`.
    pub async fn store(
        &self,
        generation: u64,
        request: AnalysisRequest,
        results: Vec<MatchResult>,
    ) -> bool {
        let mut state = self.inner.write().await;
        if state.generation != generation {
            return false;
        }
        state.snapshot = Some(AnalysisSnapshot {
            request,
            results,
            analyzed_at: Utc::now(),
        });
        true
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Option<AnalysisSnapshot> {
        self.inner.read().await.snapshot.clone()
    }

    /// Applies `filter` to the cached list. `None` when nothing has been analyzed.
    pub async fn filtered(&self, filter: &ResultFilter) -> Option<FilteredView> {
        let state = self.inner.read().await;
        let snapshot = state.snapshot.as_ref()?;
        let results = filter_results(&snapshot.results, filter.min_score, &filter.keyword);
        Some(FilteredView {
            shown: results.len(),
            total: snapshot.results.len(),
            results,
            requirements: snapshot.request.requirements.clone(),
            analyzed_at: snapshot.analyzed_at,
        })
    }

    /// Drops one document's row from the cached list and invalidates runs in flight.
    pub async fn remove_document(&self, id: Uuid) {
        let mut state = self.inner.write().await;
        state.generation += 1;
        if let Some(snapshot) = state.snapshot.as_mut() {
            snapshot.results.retain(|r| r.document_id != id);
        }
    }

    pub async fn clear(&self) {
        let mut state = self.inner.write().await;
        state.generation += 1;
        state.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::ingest::store::DocumentStore;
    use crate::matching::aggregate::MatchBreakdown;
    use crate::matching::engine::analyze;
    use crate::models::document::CandidateDocument;

    fn result(match_score: u8) -> MatchResult {
        MatchResult {
            document_id: Uuid::new_v4(),
            name: format!("doc-{match_score}"),
            match_score,
            content: String::new(),
            key_matches: vec![],
            match_breakdown: MatchBreakdown::default(),
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            requirements: "rust".to_string(),
            k: NonZeroUsize::new(5).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_filtered_empty_cache() {
        let cache = AnalysisCache::default();
        assert!(cache.filtered(&ResultFilter::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_filtered_reports_shown_and_total() {
        let cache = AnalysisCache::default();
        let run = cache.begin_run().await;
        cache
            .store(run, request(), vec![result(95), result(60), result(40)])
            .await;

        let view = cache.filtered(&ResultFilter::new(50, "")).await.unwrap();
        assert_eq!(view.shown, 2);
        assert_eq!(view.total, 3);
    }

    #[tokio::test]
    async fn test_store_replaces_previous_run() {
        let cache = AnalysisCache::default();
        let run = cache.begin_run().await;
        assert!(cache.store(run, request(), vec![result(10), result(20)]).await);
        let run = cache.begin_run().await;
        assert!(cache.store(run, request(), vec![result(30)]).await);
        assert_eq!(cache.snapshot().await.unwrap().results.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_document_and_clear() {
        let cache = AnalysisCache::default();
        let first = result(90);
        let id = first.document_id;
        let run = cache.begin_run().await;
        cache.store(run, request(), vec![first, result(80)]).await;

        cache.remove_document(id).await;
        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(snapshot.results.len(), 1);
        assert!(snapshot.results.iter().all(|r| r.document_id != id));

        cache.clear().await;
        assert!(cache.snapshot().await.is_none());
    }

    fn doc(name: &str, content: &str) -> CandidateDocument {
        CandidateDocument::new(name, "text/plain", content.len() as u64, content.to_string())
    }

    #[tokio::test]
    async fn test_run_overlapping_removal_is_not_stored() {
        let documents = DocumentStore::default();
        let cache = AnalysisCache::default();
        documents
            .add(vec![doc("a.txt", "rust and tokio"), doc("b.txt", "rust")])
            .await;

        let run = cache.begin_run().await;
        let scored = documents.snapshot().await;
        let removed = scored[0].id;

        // The removal lands while the run is scoring its snapshot.
        assert!(documents.remove(removed).await);
        cache.remove_document(removed).await;

        let results = analyze(&request(), &scored).unwrap();
        assert!(results.iter().any(|r| r.document_id == removed));
        assert!(!cache.store(run, request(), results).await);

        assert!(cache.filtered(&ResultFilter::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_run_overlapping_reset_is_not_stored() {
        let cache = AnalysisCache::default();
        let run = cache.begin_run().await;
        cache.clear().await;
        assert!(!cache.store(run, request(), vec![result(70)]).await);
        assert!(cache.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_older_run_cannot_overwrite_newer() {
        let cache = AnalysisCache::default();
        let older = cache.begin_run().await;
        let newer = cache.begin_run().await;

        assert!(cache.store(newer, request(), vec![result(90)]).await);
        assert!(!cache.store(older, request(), vec![result(10), result(20)]).await);

        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(snapshot.results.len(), 1);
        assert_eq!(snapshot.results[0].match_score, 90);
    }

    #[tokio::test]
    async fn test_removal_after_store_keeps_other_rows() {
        let cache = AnalysisCache::default();
        let kept = result(50);
        let dropped = result(40);
        let dropped_id = dropped.document_id;
        let run = cache.begin_run().await;
        assert!(cache.store(run, request(), vec![kept, dropped]).await);

        cache.remove_document(dropped_id).await;
        let view = cache.filtered(&ResultFilter::default()).await.unwrap();
        assert_eq!(view.total, 1);
        assert_eq!(view.results[0].match_score, 50);
    }
}
