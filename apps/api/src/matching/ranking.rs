//! Ranking and post-rank filtering of scored documents.

use std::cmp::Reverse;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::aggregate::{DocumentScore, MatchBreakdown};
use crate::models::document::CandidateDocument;

/// Number of matches surfaced as `key_matches` on a result.
pub const KEY_MATCH_LIMIT: usize = 10;

/// One document's scored result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub document_id: Uuid,
    pub name: String,
    pub match_score: u8,
    /// Full document text; the keyword filter searches it.
    pub content: String,
    pub key_matches: Vec<String>,
    pub match_breakdown: MatchBreakdown,
}

impl MatchResult {
    pub fn new(document: &CandidateDocument, score: DocumentScore) -> Self {
        let key_matches = score
            .breakdown
            .matches
            .iter()
            .take(KEY_MATCH_LIMIT)
            .cloned()
            .collect();
        Self {
            document_id: document.id,
            name: document.name.clone(),
            match_score: score.match_score,
            content: document.content.clone(),
            key_matches,
            match_breakdown: score.breakdown,
        }
    }
}

/// Sorts by `match_score` descending and keeps the first `k`.
/// Ties keep their input order.
pub fn rank_top_k(mut results: Vec<MatchResult>, k: NonZeroUsize) -> Vec<MatchResult> {
    results.sort_by_key(|r| Reverse(r.match_score));
    results.truncate(k.get());
    results
}

/// Read-side projection over a ranked list: minimum score plus optional keyword.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultFilter {
    #[serde(default)]
    pub min_score: u8,
    #[serde(default)]
    pub keyword: String,
}

impl ResultFilter {
    pub fn new(min_score: u8, keyword: impl Into<String>) -> Self {
        Self {
            min_score,
            keyword: keyword.into(),
        }
    }

    /// An empty keyword matches everything; otherwise the keyword must appear,
    /// case-insensitively, in the content or in one of the key matches.
    pub fn accepts(&self, result: &MatchResult) -> bool {
        if result.match_score < self.min_score {
            return false;
        }
        if self.keyword.is_empty() {
            return true;
        }
        let keyword = self.keyword.to_lowercase();
        result.content.to_lowercase().contains(&keyword)
            || result
                .key_matches
                .iter()
                .any(|m| m.to_lowercase().contains(&keyword))
    }

    pub fn apply(&self, ranked: &[MatchResult]) -> Vec<MatchResult> {
        ranked.iter().filter(|r| self.accepts(r)).cloned().collect()
    }
}

/// Filters an already-ranked list, preserving its order.
pub fn filter_results(ranked: &[MatchResult], min_score: u8, keyword: &str) -> Vec<MatchResult> {
    ResultFilter::new(min_score, keyword).apply(ranked)
}
