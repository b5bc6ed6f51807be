//! Key-phrase extraction from requirement text.

use std::collections::HashSet;

use crate::matching::patterns::{EXPERIENCE, PHRASE_DELIMITERS, TECHNICAL_TERM};

/// Phrases must be longer than this many characters after trimming.
const MIN_PHRASE_CHARS: usize = 5;

/// Extracts key phrases from requirement text.
///
/// Three sources, unioned in discovery order with exact-string dedup:
/// 1. delimiter-split phrases (`,` `;` `.`) longer than five characters
/// 2. technical terms (capitalized runs, acronyms, dotted identifiers)
/// 3. experience-duration phrases
///
/// Callers should treat the result as a set; the order carries no meaning.
pub fn extract_key_phrases(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let phrases = text
        .split(PHRASE_DELIMITERS)
        .map(str::trim)
        .filter(|phrase| phrase.chars().count() > MIN_PHRASE_CHARS);

    let technical_terms = TECHNICAL_TERM.find_iter(text).map(|m| m.as_str());

    let experience_phrases = EXPERIENCE.find_iter(text).map(|m| m.as_str());

    let mut seen = HashSet::new();
    phrases
        .chain(technical_terms)
        .chain(experience_phrases)
        .filter(|candidate| seen.insert(*candidate))
        .map(str::to_string)
        .collect()
}
