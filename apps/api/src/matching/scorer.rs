//! Skill and keyword matching between a resume and a job posting.
//!
//! The match score is a weighted sum of three components: required
//! skills coverage (up to 50), overlap with the full job description
//! vocabulary (up to 30), and coverage of the description's most
//! frequent terms (up to 20). All matching is case-insensitive; skill
//! hits are substring hits against the resume text.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Words too common to signal anything about fit.
const STOP_WORDS: &[&str] = &[
    "about", "all", "and", "are", "been", "being", "but", "can", "for", "from", "had", "has",
    "have", "her", "his", "into", "its", "more", "most", "not", "other", "our", "out", "over",
    "some", "such", "than", "that", "the", "their", "them", "then", "they", "this", "those",
    "was", "were", "what", "when", "which", "while", "who", "will", "with", "you", "your",
];

/// How many of the description's top terms feed the keyword component.
const SIGNIFICANT_TERM_LIMIT: usize = 10;

const SKILLS_WEIGHT: f64 = 50.0;
const DESCRIPTION_WEIGHT: f64 = 30.0;
const KEYWORDS_WEIGHT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatchScore {
    pub total_score: u32,
    pub skills_match: u32,
    pub description_match: u32,
    pub keywords_match: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Deduplicates required skills case-insensitively, keeping the first
/// spelling and the original order.
pub fn dedup_skills(required_skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();
    for skill in required_skills {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            deduped.push(trimmed.to_string());
        }
    }
    deduped
}

pub fn match_resume_to_job(
    resume_text: &str,
    job_description: &str,
    required_skills: &[String],
) -> JobMatchScore {
    let resume_lower = resume_text.to_lowercase();

    let required = dedup_skills(required_skills);
    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();
    for skill in &required {
        if resume_lower.contains(&skill.to_lowercase()) {
            matched_skills.push(skill.clone());
        } else {
            missing_skills.push(skill.clone());
        }
    }
    let skills_match = if required.is_empty() {
        0
    } else {
        ((matched_skills.len() as f64 / required.len() as f64) * SKILLS_WEIGHT).round() as u32
    };

    let resume_tokens = significant_tokens(&resume_lower);
    let description_lower = job_description.to_lowercase();

    let description_tokens = significant_tokens(&description_lower);
    let description_match = if description_tokens.is_empty() {
        0
    } else {
        let hits = description_tokens
            .iter()
            .filter(|token| resume_tokens.contains(*token))
            .count();
        ((hits as f64 / description_tokens.len() as f64) * DESCRIPTION_WEIGHT).round() as u32
    };

    let top_terms = significant_terms(&description_lower);
    let keywords_match = if top_terms.is_empty() {
        0
    } else {
        let hits = top_terms
            .iter()
            .filter(|term| resume_tokens.contains(*term))
            .count();
        ((hits as f64 / top_terms.len() as f64) * KEYWORDS_WEIGHT).round() as u32
    };

    JobMatchScore {
        total_score: skills_match + description_match + keywords_match,
        skills_match,
        description_match,
        keywords_match,
        matched_skills,
        missing_skills,
    }
}

/// Distinct lowercase alphanumeric tokens longer than two chars,
/// stop words removed.
fn significant_tokens(lower_text: &str) -> HashSet<String> {
    lower_text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 2 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// The description's top terms by frequency, ties broken
/// alphabetically so the selection is deterministic.
fn significant_terms(lower_text: &str) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in lower_text.split(|c: char| !c.is_alphanumeric()) {
        if token.len() > 2 && !STOP_WORDS.contains(&token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    let mut terms: Vec<(&str, usize)> = counts.into_iter().collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    terms
        .into_iter()
        .take(SIGNIFICANT_TERM_LIMIT)
        .map(|(term, _)| term.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_half_of_required_skills_scores_25() {
        let score = match_resume_to_job(
            "Five years writing python services",
            "",
            &skills(&["python", "react"]),
        );
        assert_eq!(score.skills_match, 25);
        assert_eq!(score.matched_skills, vec!["python"]);
        assert_eq!(score.missing_skills, vec!["react"]);
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let score = match_resume_to_job(
            "Expert in Python and PostgreSQL",
            "",
            &skills(&["PYTHON", "postgresql"]),
        );
        assert_eq!(score.skills_match, 50);
        assert_eq!(score.matched_skills, vec!["PYTHON", "postgresql"]);
        assert!(score.missing_skills.is_empty());
    }

    #[test]
    fn test_duplicate_skills_count_once() {
        let score = match_resume_to_job(
            "python everywhere",
            "",
            &skills(&["python", "Python", "PYTHON", "react"]),
        );
        // Deduped set is {python, react}; one hit out of two
        assert_eq!(score.skills_match, 25);
        assert_eq!(score.matched_skills, vec!["python"]);
        assert_eq!(score.missing_skills, vec!["react"]);
    }

    #[test]
    fn test_matched_and_missing_partition_the_required_set() {
        let required = skills(&["python", "react", "docker"]);
        let score = match_resume_to_job("docker and python daily", "", &required);
        let mut all: Vec<String> = score
            .matched_skills
            .iter()
            .chain(score.missing_skills.iter())
            .cloned()
            .collect();
        all.sort();
        assert_eq!(all, vec!["docker", "python", "react"]);
        for skill in &score.matched_skills {
            assert!(!score.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_empty_required_skills_scores_zero() {
        let score = match_resume_to_job("any resume text", "", &[]);
        assert_eq!(score.skills_match, 0);
        assert!(score.matched_skills.is_empty());
        assert!(score.missing_skills.is_empty());
    }

    #[test]
    fn test_empty_description_contributes_nothing() {
        let score = match_resume_to_job("python developer", "", &skills(&["python"]));
        assert_eq!(score.description_match, 0);
        assert_eq!(score.keywords_match, 0);
        assert_eq!(score.total_score, score.skills_match);
    }

    #[test]
    fn test_full_description_overlap_scores_30() {
        let score = match_resume_to_job(
            "kubernetes deployments monitoring",
            "kubernetes deployments monitoring",
            &[],
        );
        assert_eq!(score.description_match, 30);
        assert_eq!(score.keywords_match, 20);
        assert_eq!(score.total_score, 50);
    }

    #[test]
    fn test_stop_words_and_short_tokens_are_ignored() {
        let score = match_resume_to_job(
            "the and for with you",
            "the and for with you go",
            &[],
        );
        assert_eq!(score.description_match, 0);
        assert_eq!(score.keywords_match, 0);
    }

    #[test]
    fn test_top_terms_prefer_frequency_then_alphabetical() {
        let terms = significant_terms("rust rust rust axum axum tokio zebra apple");
        assert_eq!(terms[0], "rust");
        assert_eq!(terms[1], "axum");
        // Singletons follow in alphabetical order
        assert_eq!(&terms[2..], ["apple", "tokio", "zebra"]);
    }

    #[test]
    fn test_full_match_totals_100() {
        let resume = "senior rust engineer building axum services with kubernetes";
        let description = "senior rust engineer building axum services with kubernetes";
        let score = match_resume_to_job(resume, description, &skills(&["rust", "axum"]));
        assert_eq!(
            score.total_score,
            score.skills_match + score.description_match + score.keywords_match
        );
        assert_eq!(score.total_score, 100);
    }
}
