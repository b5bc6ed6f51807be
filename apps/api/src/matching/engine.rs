//! Analysis run — scores a document set against one requirement text and ranks it.
//!
//! Pure and synchronous. Callers that must stay responsive run it on a blocking
//! thread; a superseded run can simply be discarded since the same inputs always
//! reproduce the same output.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::aggregate::RequirementProfile;
use crate::matching::phrases::extract_key_phrases;
use crate::matching::ranking::{rank_top_k, MatchResult};
use crate::models::document::CandidateDocument;

/// Immutable input of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub requirements: String,
    pub k: NonZeroUsize,
}

/// Scores every document and returns the top-K ranked list.
///
/// Documents are scored in slice order, which is also the tie-break order.
pub fn analyze(
    request: &AnalysisRequest,
    documents: &[CandidateDocument],
) -> Result<Vec<MatchResult>, AppError> {
    if request.requirements.trim().is_empty() {
        return Err(AppError::Validation(
            "requirements cannot be empty".to_string(),
        ));
    }
    if documents.is_empty() {
        return Err(AppError::Validation(
            "at least one document is required".to_string(),
        ));
    }

    let key_phrases = extract_key_phrases(&request.requirements);
    let profile = RequirementProfile::new(&request.requirements, key_phrases)?;

    let results = documents
        .iter()
        .map(|doc| MatchResult::new(doc, profile.score(&doc.content)))
        .collect();

    Ok(rank_top_k(results, request.k))
}
