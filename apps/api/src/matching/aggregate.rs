//! Score aggregation — folds category tallies and fallback matches into one 0–100 score.
//!
//! Algorithm:
//! 1. Sum `score` and `max` over categories with `max > 0`
//! 2. Every match beyond the category score adds 0.5 to both sums
//! 3. With no structured checks at all, fall back to `matches / requirement words`
//! 4. `round(min(100, total_score / total_max × 100))`

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::categories::{
    experience_clauses, scan_all, ExperienceClause, MatchCategories,
};
use crate::matching::words::{match_key_phrases, match_words, requirement_words};

/// Weight of each match not already accounted for by a category check.
const ADDITIONAL_MATCH_WEIGHT: f64 = 0.5;

/// Evidence trail behind a single document's score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    /// Matched strings in discovery order, exact duplicates removed.
    pub matches: Vec<String>,
    pub categories: MatchCategories,
}

/// Score of one document against one requirement text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentScore {
    pub match_score: u8,
    pub breakdown: MatchBreakdown,
}

/// Everything derived from one requirement text, built once per analysis run
/// and reused for every document.
#[derive(Debug, Clone)]
pub struct RequirementProfile {
    requirements: String,
    words: Vec<String>,
    key_phrases: Vec<String>,
    experience: Vec<ExperienceClause>,
}

impl RequirementProfile {
    /// `key_phrases` comes from `extract_key_phrases(requirements)` on the
    /// original-case text.
    pub fn new(requirements: &str, key_phrases: Vec<String>) -> Result<Self, AppError> {
        if requirements.trim().is_empty() {
            return Err(AppError::Validation(
                "requirements cannot be empty".to_string(),
            ));
        }

        let requirements = requirements.to_lowercase();
        let words = requirement_words(&requirements);
        let experience = experience_clauses(&requirements);

        Ok(Self {
            requirements,
            words,
            key_phrases,
            experience,
        })
    }

    /// Scores one document's content. Empty content scores 0.
    pub fn score(&self, content: &str) -> DocumentScore {
        if content.is_empty() {
            return DocumentScore::default();
        }

        let document = content.to_lowercase();

        let (categories, mut matches) =
            scan_all(&self.requirements, &self.experience, &document);
        let word_matches = match_words(&self.words, &document, &matches);
        matches.extend(word_matches);
        matches.extend(match_key_phrases(&self.key_phrases, &document));

        let match_score = aggregate(&categories, matches.len(), self.words.len());

        DocumentScore {
            match_score,
            breakdown: MatchBreakdown {
                matches: dedup_preserving_order(matches),
                categories,
            },
        }
    }
}

/// Scores one document's content against the requirement text.
///
/// Batch runs build a [`RequirementProfile`] once instead.
pub fn score_document(
    content: &str,
    requirements: &str,
    key_phrases: &[String],
) -> Result<DocumentScore, AppError> {
    let profile = RequirementProfile::new(requirements, key_phrases.to_vec())?;
    Ok(profile.score(content))
}

/// Combines category tallies with the raw (pre-dedup) match count.
pub fn aggregate(categories: &MatchCategories, match_count: usize, word_count: usize) -> u8 {
    let (mut total_score, mut total_max) = categories
        .iter()
        .filter(|(_, category)| category.max > 0)
        .fold((0.0_f64, 0.0_f64), |(score, max), (_, category)| {
            (score + f64::from(category.score), max + f64::from(category.max))
        });

    let additional = match_count as f64 - total_score;
    if additional > 0.0 {
        total_score += additional * ADDITIONAL_MATCH_WEIGHT;
        total_max += additional * ADDITIONAL_MATCH_WEIGHT;
    }

    if total_max == 0.0 {
        total_max = word_count as f64;
        total_score = match_count as f64;
    }

    if total_max <= 0.0 {
        return 0;
    }

    ((total_score / total_max) * 100.0).min(100.0).round().clamp(0.0, 100.0) as u8
}

fn dedup_preserving_order(matches: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}
