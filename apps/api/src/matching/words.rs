//! Fallback matchers: individual requirement words and extracted key phrases.

use std::collections::HashSet;

use crate::matching::patterns::NON_WORD;

/// Words must be longer than this to take part in word matching.
const MIN_WORD_LEN: usize = 3;

/// Unique words (> 3 chars) of case-folded requirement text, first-seen order.
pub fn requirement_words(requirements: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    NON_WORD
        .split(requirements)
        .filter(|word| word.len() > MIN_WORD_LEN)
        .filter(|word| seen.insert(*word))
        .map(str::to_string)
        .collect()
}

/// Returns the requirement words found in the document that are not already
/// covered by a recorded match.
///
/// Coverage is substring containment against `recorded` plus the words accepted
/// earlier in this same pass.
pub fn match_words(words: &[String], document: &str, recorded: &[String]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for word in words {
        let covered = recorded
            .iter()
            .chain(found.iter())
            .any(|m| m.contains(word.as_str()));
        if !covered && document.contains(word.as_str()) {
            found.push(word.clone());
        }
    }
    found
}

/// Returns the trimmed key phrases whose case-folded form appears in the document.
pub fn match_key_phrases(phrases: &[String], document: &str) -> Vec<String> {
    phrases
        .iter()
        .map(|phrase| phrase.trim())
        .filter(|phrase| {
            let folded = phrase.to_lowercase();
            !folded.is_empty() && document.contains(&folded)
        })
        .map(str::to_string)
        .collect()
}
