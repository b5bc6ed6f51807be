//! Category scanners — skills, experience, education and soft skills.
//!
//! Each scanner mines the requirement text for its own pattern and checks the
//! document for corroborating evidence. Both inputs are expected case-folded.
//! Evidence is plain substring containment; accidental containment counts.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::patterns::{
    document_experience, parse_years, EDUCATION, EXPERIENCE, SKILL, SOFT_SKILLS,
};

/// Satisfied checks (`score`) out of attempted checks (`max`) for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCategory {
    pub score: u32,
    pub max: u32,
}

impl MatchCategory {
    fn attempt(&mut self, satisfied: bool) {
        self.max += 1;
        if satisfied {
            self.score += 1;
        }
    }
}

/// The four named categories of a match breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCategories {
    pub skills: MatchCategory,
    pub experience: MatchCategory,
    pub education: MatchCategory,
    pub soft_skills: MatchCategory,
}

impl MatchCategories {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &MatchCategory)> {
        [
            ("skills", &self.skills),
            ("experience", &self.experience),
            ("education", &self.education),
            ("soft_skills", &self.soft_skills),
        ]
        .into_iter()
    }
}

/// Result of one scanner: its category tally and the evidence it recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub category: MatchCategory,
    pub evidence: Vec<String>,
}

impl ScanOutcome {
    fn record(&mut self, satisfied: bool, evidence: impl FnOnce() -> String) {
        self.category.attempt(satisfied);
        if satisfied {
            self.evidence.push(evidence());
        }
    }
}

/// Runs all four scanners in their fixed order.
///
/// `experience` holds the clauses parsed once from the same requirement text.
pub fn scan_all(
    requirements: &str,
    experience: &[ExperienceClause],
    document: &str,
) -> (MatchCategories, Vec<String>) {
    let skills = scan_skills(requirements, document);
    let experience = scan_experience(experience, document);
    let education = scan_education(requirements, document);
    let soft_skills = scan_soft_skills(requirements, document);

    let categories = MatchCategories {
        skills: skills.category,
        experience: experience.category,
        education: education.category,
        soft_skills: soft_skills.category,
    };

    let evidence = [skills, experience, education, soft_skills]
        .into_iter()
        .flat_map(|outcome| outcome.evidence)
        .collect();

    (categories, evidence)
}

/// `proficient|experience|skilled [in|with] <skill>`: the captured skill must
/// appear in the document.
pub fn scan_skills(requirements: &str, document: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for caps in SKILL.captures_iter(requirements) {
        let skill = caps[1].trim();
        outcome.record(document.contains(skill), || skill.to_string());
    }
    outcome
}

/// One `N[+] year(s) [of experience] [in|with <area>]` clause of the requirements,
/// with its document-side search compiled.
#[derive(Debug, Clone)]
pub struct ExperienceClause {
    pub required_years: u64,
    pub area: String,
    pattern: Option<Regex>,
}

/// Parses every experience clause of case-folded requirement text.
pub fn experience_clauses(requirements: &str) -> Vec<ExperienceClause> {
    EXPERIENCE
        .captures_iter(requirements)
        .map(|caps| {
            let area = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let pattern = document_experience(area)
                .map_err(|e| tracing::warn!("Skipping experience area '{area}': {e}"))
                .ok();
            ExperienceClause {
                required_years: parse_years(&caps[1]),
                area: area.to_string(),
                pattern,
            }
        })
        .collect()
}

/// Each clause needs the document to state at least N years followed (within
/// the same clause) by the same area text.
pub fn scan_experience(clauses: &[ExperienceClause], document: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for clause in clauses {
        let document_years = clause
            .pattern
            .as_ref()
            .and_then(|pattern| pattern.captures(document))
            .map(|found| parse_years(&found[1]));

        match document_years {
            Some(years) if years >= clause.required_years => {
                outcome.record(true, || format!("{years}+ years {}", clause.area))
            }
            _ => outcome.record(false, String::new),
        }
    }
    outcome
}

/// Degree keyword plus field: the whole matched phrase must appear in the document.
pub fn scan_education(requirements: &str, document: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for found in EDUCATION.find_iter(requirements) {
        let phrase = found.as_str().trim();
        outcome.record(document.contains(phrase), || phrase.to_string());
    }
    outcome
}

/// Fixed vocabulary: each term named by the requirements is checked in the document.
pub fn scan_soft_skills(requirements: &str, document: &str) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for &term in SOFT_SKILLS.iter().filter(|&&term| requirements.contains(term)) {
        outcome.record(document.contains(term), || term.to_string());
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(requirements: &str, document: &str) -> ScanOutcome {
        scan_experience(&experience_clauses(requirements), document)
    }

    fn scan(requirements: &str, document: &str) -> (MatchCategories, Vec<String>) {
        scan_all(requirements, &experience_clauses(requirements), document)
    }

    #[test]
    fn test_skills_hit_and_miss() {
        let outcome = scan_skills(
            "proficient in kubernetes, experience with terraform",
            "ran kubernetes clusters for five years",
        );
        assert_eq!(outcome.category, MatchCategory { score: 1, max: 2 });
        assert_eq!(outcome.evidence, vec!["kubernetes".to_string()]);
    }

    #[test]
    fn test_skills_no_pattern_means_no_checks() {
        let outcome = scan_skills("looking for a rust developer", "rust developer");
        assert_eq!(outcome.category, MatchCategory::default());
        assert!(outcome.evidence.is_empty());
    }

    #[test]
    fn test_experience_enough_years() {
        let outcome = experience(
            "5+ years of experience in react",
            "7 years building apps in react",
        );
        assert_eq!(outcome.category, MatchCategory { score: 1, max: 1 });
        assert_eq!(outcome.evidence, vec!["7+ years react".to_string()]);
    }

    #[test]
    fn test_experience_too_few_years() {
        let outcome = experience("5 years with python", "2 years of python");
        assert_eq!(outcome.category, MatchCategory { score: 0, max: 1 });
        assert!(outcome.evidence.is_empty());
    }

    #[test]
    fn test_experience_area_must_follow_years_in_same_clause() {
        let outcome = experience("3 years in go", "10 years of java. go enthusiast");
        assert_eq!(outcome.category.score, 0);
    }

    #[test]
    fn test_experience_without_area_matches_any_years() {
        let outcome = experience("at least 4 years", "6 years as developer");
        assert_eq!(outcome.category, MatchCategory { score: 1, max: 1 });
        assert_eq!(outcome.evidence, vec!["6+ years ".to_string()]);
    }

    #[test]
    fn test_experience_clauses_parsed_once() {
        let clauses = experience_clauses("2 years in rust, 4+ years with c++");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].required_years, 2);
        assert_eq!(clauses[1].area, "c++");

        let outcome = scan_experience(&clauses, "3 years in rust; 5 years with c++");
        assert_eq!(outcome.category, MatchCategory { score: 2, max: 2 });
        assert_eq!(outcome.evidence, vec!["3+ years rust", "5+ years c++"]);
    }

    #[test]
    fn test_education_full_phrase_required() {
        let outcome = scan_education(
            "master of data science, degree in physics",
            "master of data science from somewhere",
        );
        assert_eq!(outcome.category, MatchCategory { score: 1, max: 2 });
        assert_eq!(outcome.evidence, vec!["master of data science".to_string()]);
    }

    #[test]
    fn test_soft_skills_only_counts_requested_terms() {
        let outcome = scan_soft_skills(
            "strong leadership and agile mindset",
            "agile coach, teamwork, communication",
        );
        assert_eq!(outcome.category, MatchCategory { score: 1, max: 2 });
        assert_eq!(outcome.evidence, vec!["agile".to_string()]);
    }

    #[test]
    fn test_scan_all_orders_evidence_by_category() {
        let (categories, evidence) = scan(
            "proficient in sql, communication",
            "sql and communication",
        );
        assert_eq!(categories.skills.score, 1);
        assert_eq!(categories.soft_skills.score, 1);
        assert_eq!(evidence, vec!["sql".to_string(), "communication".to_string()]);
    }

    #[test]
    fn test_score_never_exceeds_max() {
        let (categories, _) = scan(
            "proficient in a, experience with b, 2 years in c, degree in d, scrum",
            "a b c d scrum 9 years in c degree in d",
        );
        for (_, category) in categories.iter() {
            assert!(category.score <= category.max);
        }
    }
}
