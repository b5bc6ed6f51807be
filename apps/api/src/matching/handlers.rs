//! Axum route handlers for the Matching API.

use std::num::NonZeroUsize;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::matching::aggregate::{score_document, DocumentScore};
use crate::matching::cache::FilteredView;
use crate::matching::engine::{analyze, AnalysisRequest};
use crate::matching::phrases::extract_key_phrases;
use crate::matching::ranking::{MatchResult, ResultFilter};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    pub requirements: String,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<MatchResult>,
    pub k: usize,
    pub documents_scored: usize,
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub min_score: Option<u8>,
    pub keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeyPhrasesBody {
    pub requirements: String,
}

#[derive(Debug, Serialize)]
pub struct KeyPhrasesResponse {
    pub key_phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreBody {
    pub requirements: String,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Scores every stored document against the requirements and caches the
/// top-K list, replacing the previous run. Scoring runs on a blocking thread.
/// A run overtaken by a removal, a reset or a newer run still answers its
/// caller but is not cached.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let k = body.k.unwrap_or(state.config.default_top_k);
    let k = NonZeroUsize::new(k)
        .ok_or_else(|| AppError::Validation("k must be at least 1".to_string()))?;

    let request = AnalysisRequest {
        requirements: body.requirements,
        k,
    };
    let generation = state.analysis.begin_run().await;
    let documents = state.documents.snapshot().await;
    let documents_scored = documents.len();

    info!("Analyzing {documents_scored} document(s), k={k}");
    let started = Instant::now();

    let run = request.clone();
    let results = tokio::task::spawn_blocking(move || analyze(&run, &documents))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))??;

    info!(
        "Analysis complete: {} result(s) in {}ms",
        results.len(),
        started.elapsed().as_millis()
    );

    if !state
        .analysis
        .store(generation, request, results.clone())
        .await
    {
        debug!("Analysis run {generation} superseded; cached results left unchanged");
    }

    Ok(Json(AnalyzeResponse {
        results,
        k: k.get(),
        documents_scored,
    }))
}

/// GET /api/v1/results?min_score=&keyword=
///
/// Filters the cached ranked list without re-scoring.
pub async fn handle_results(
    State(state): State<AppState>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<FilteredView>, AppError> {
    let min_score = query.min_score.unwrap_or(0);
    if min_score > 100 {
        return Err(AppError::Validation(
            "min_score must be between 0 and 100".to_string(),
        ));
    }
    let filter = ResultFilter::new(min_score, query.keyword.unwrap_or_default());

    let view = state
        .analysis
        .filtered(&filter)
        .await
        .ok_or_else(|| AppError::NotFound("No analysis has been run yet".to_string()))?;

    debug!(
        "Showing {} of {} results (min_score={}, keyword='{}')",
        view.shown, view.total, filter.min_score, filter.keyword
    );
    Ok(Json(view))
}

/// POST /api/v1/key-phrases
pub async fn handle_key_phrases(
    Json(body): Json<KeyPhrasesBody>,
) -> Result<Json<KeyPhrasesResponse>, AppError> {
    if body.requirements.trim().is_empty() {
        return Err(AppError::Validation(
            "requirements cannot be empty".to_string(),
        ));
    }
    Ok(Json(KeyPhrasesResponse {
        key_phrases: extract_key_phrases(&body.requirements),
    }))
}

/// POST /api/v1/score
///
/// Scores a single piece of text; nothing is stored.
pub async fn handle_score(Json(body): Json<ScoreBody>) -> Result<Json<DocumentScore>, AppError> {
    let key_phrases = extract_key_phrases(&body.requirements);
    let score = score_document(&body.content, &body.requirements, &key_phrases)?;
    Ok(Json(score))
}
