//! Heuristic patterns shared by the phrase extractor and the category scanners.
//!
//! Category patterns are applied to case-folded text. The technical-term and
//! experience-phrase patterns in `phrases` run on the original text, so the
//! capitalization rules below are meaningful there.

use once_cell::sync::Lazy;
use regex::Regex;

/// Capitalized word runs, all-caps acronyms (optionally `++`), dotted lowercase identifiers.
/// Word boundaries are ASCII-only: a non-ASCII letter does not count as a word character.
pub static TECHNICAL_TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)([A-Z][a-z]+(?:\s[A-Z][a-z]+)*|[A-Z]{2,}(?:\+\+)?|[a-z]+(?:\.[a-z]+)+)(?-u:\b)")
        .unwrap()
});

/// `<years>[+] year(s) [of experience] [in|with <area>]`.
/// Group 1 is the year count, group 2 the optional area.
pub static EXPERIENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\+?\s+years?(?:\s+of\s+experience)?(?:\s+(?:in|with)\s+([^,.;]+))?")
        .unwrap()
});

/// `(proficient|experience|skilled) [in|with] <skill>`. Group 1 is the skill text.
pub static SKILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:proficient|experience|skilled)\s+(?:in|with)?\s+([^,.;]+)").unwrap()
});

/// Degree keywords followed by an optional `in`/`of` and the field.
pub static EDUCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:degree|bachelor|master|phd|doctorate|bs|ms|ba|ma)\s+(?:in|of)?\s+([^,.;]+)")
        .unwrap()
});

/// Runs of non-word characters; splits requirement text into words.
pub static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Delimiters for key-phrase splitting.
pub const PHRASE_DELIMITERS: [char; 3] = [',', ';', '.'];

/// Fixed soft-skill vocabulary, checked by plain substring containment.
pub const SOFT_SKILLS: &[&str] = &[
    "communication",
    "teamwork",
    "leadership",
    "problem-solving",
    "critical thinking",
    "agile",
    "scrum",
];

/// Builds the document-side experience search for a required area.
///
/// The area is escaped so it matches as literal text after the year count.
pub fn document_experience(area: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?i)([0-9]+)\+?\s+years?[^,.;]*{}",
        regex::escape(area)
    ))
}

/// Parses a captured year count; counts too large for `u64` saturate.
pub fn parse_years(raw: &str) -> u64 {
    raw.parse::<u64>().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_captures_years_and_area() {
        let caps = EXPERIENCE
            .captures("3+ years of experience in react and node.js, proficient in sql")
            .unwrap();
        assert_eq!(&caps[1], "3");
        assert_eq!(caps.get(2).unwrap().as_str(), "react and node");
    }

    #[test]
    fn test_experience_area_is_optional() {
        let caps = EXPERIENCE.captures("at least 2 years").unwrap();
        assert_eq!(&caps[1], "2");
        assert!(caps.get(2).is_none());
    }

    #[test]
    fn test_skill_without_preposition_needs_two_spaces() {
        assert!(SKILL.captures("skilled rust").is_none());
        let caps = SKILL.captures("skilled  rust").unwrap();
        assert_eq!(&caps[1], "rust");
    }

    #[test]
    fn test_education_full_match() {
        let m = EDUCATION
            .find("bachelor's degree in computer science, strong skills")
            .unwrap();
        assert_eq!(m.as_str(), "degree in computer science");
    }

    #[test]
    fn test_document_experience_escapes_area() {
        let re = document_experience("c++").unwrap();
        assert!(re.is_match("7 years writing c++"));
        assert!(!re.is_match("7 years writing cpp"));
    }

    #[test]
    fn test_parse_years_saturates() {
        assert_eq!(parse_years("12"), 12);
        assert_eq!(parse_years("99999999999999999999999"), u64::MAX);
    }
}
