//! Professionalism scoring for resume text.
//!
//! The score is a sum of ten capped sub-scores with a fixed weight
//! split: structure 25, grammar 20, readability 15, keywords 15,
//! length 10, contact 10, achievements 5, formatting 10, action verbs
//! 5, quantification 5. The total is the clamped sum truncated to an
//! integer. Alongside the score, a fixed ordered checklist of
//! threshold checks produces the improvement suggestions, so equal
//! inputs always produce the identical issue list.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::readability::{flesch_reading_ease, prefix_chars, segment_sentences};
use crate::analysis::sections::ResumeSections;
use crate::errors::AppError;

/// Grammar checks only look at the head of the document.
const GRAMMAR_SCAN_CHARS: usize = 10_000;

const TECH_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "react",
    "sql",
    "management",
    "node",
    "java",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "data analysis",
    "project management",
    "agile",
    "scrum",
    "git",
    "rest api",
    "microservices",
    "devops",
    "ci/cd",
    "tensorflow",
    "pytorch",
];

const ACHIEVEMENT_WORDS: &[&str] = &[
    "achieved",
    "increased",
    "improved",
    "reduced",
    "developed",
    "created",
    "managed",
    "led",
    "implemented",
];

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "accomplished",
    "administered",
    "analyzed",
    "assisted",
    "built",
    "collaborated",
    "created",
    "delivered",
    "designed",
    "developed",
    "executed",
    "facilitated",
    "generated",
    "implemented",
    "improved",
    "increased",
    "initiated",
    "launched",
    "led",
    "managed",
    "optimized",
    "organized",
    "performed",
    "planned",
    "produced",
    "reduced",
    "resolved",
    "streamlined",
    "supervised",
    "transformed",
    "utilized",
];

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-•*]\s").unwrap());

static NUMERIC_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?%?\b").unwrap());

static QUANTIFIED_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:increased|decreased|reduced|improved|saved|generated|managed|led|supervised|trained|developed|created|built|delivered|achieved|accomplished|grew|expanded|optimized|streamlined|enhanced|boosted|raised|lowered|cut|eliminated|minimized|maximized|doubled|tripled|quadrupled|halved|by\s+\d+%?|\d+x|\d+\s+times|\d+\s+fold)\b",
    )
    .unwrap()
});

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+").unwrap());

static PROPER_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z]+\s+[A-Z][a-z]+").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

static PHONE_FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{3}\)\s*\d{3}-\d{4}|\d{3}-\d{3}-\d{4}").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Score types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub structure: u32,
    pub grammar: u32,
    pub readability: f64,
    pub keywords: u32,
    pub length: u32,
    pub contact: u32,
    pub achievements: u32,
    pub formatting: u32,
    pub action_verbs: u32,
    pub quantification: u32,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.structure as f64
            + self.grammar as f64
            + self.readability
            + self.keywords as f64
            + self.length as f64
            + self.contact as f64
            + self.achievements as f64
            + self.formatting as f64
            + self.action_verbs as f64
            + self.quantification as f64
    }

    /// Total professionalism score, clamped to 0..=100 and truncated.
    pub fn total(&self) -> u32 {
        self.sum().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub word_count: usize,
    pub sections_found: usize,
    pub has_email: bool,
    pub has_phone: bool,
    pub bullet_count: usize,
    pub achievement_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total: u32,
    pub issues: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub details: AnalysisDetails,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_resume_score(
    text: &str,
    sections: &ResumeSections,
) -> Result<ScoreReport, AppError> {
    score_inner(text, sections).map_err(|e| AppError::ScoreComputation(e.to_string()))
}

fn score_inner(text: &str, sections: &ResumeSections) -> anyhow::Result<ScoreReport> {
    let text_lower = text.to_lowercase();

    // Structure: standard sections found plus bullet usage
    let found_sections = [
        !sections.summary.is_empty(),
        !sections.experience.is_empty(),
        !sections.education.is_empty(),
        !sections.skills.is_empty(),
    ]
    .iter()
    .filter(|present| **present)
    .count() as u32;
    let bullet_count = BULLET_RE.find_iter(text).count();
    let structure = (found_sections * 5 + bullet_count as u32).min(25);

    // Grammar: capitalization and run-on checks over the document head
    let mut grammar_errors = 0u32;
    for sentence in segment_sentences(prefix_chars(text, GRAMMAR_SCAN_CHARS)) {
        if let Some(first) = sentence.chars().next() {
            if !first.is_uppercase() {
                grammar_errors += 1;
            }
        }
        if sentence.chars().count() > 30 && !sentence.ends_with(['.', '!', '?']) {
            grammar_errors += 1;
        }
    }
    let grammar = 20u32.saturating_sub(grammar_errors.min(20));

    // Readability: Flesch reading ease mapped onto 0..=15
    let flesch = flesch_reading_ease(text);
    let readability = (flesch / 6.67).clamp(0.0, 15.0);

    let keywords_found = TECH_KEYWORDS
        .iter()
        .filter(|keyword| text_lower.contains(*keyword))
        .count() as u32;
    let keywords = (keywords_found * 2).min(15);

    // Length: full credit inside the 300..=800 word band, linear
    // falloff outside it
    let word_count = text.split_whitespace().count();
    let length = if (300..=800).contains(&word_count) {
        10
    } else {
        10u32.saturating_sub((word_count.abs_diff(550) / 50) as u32)
    };

    let contact_info = &sections.contact;
    let contact = contact_info.email.is_some() as u32 * 4
        + contact_info.phone.is_some() as u32 * 3
        + contact_info.linkedin.is_some() as u32 * 3;

    let achievement_count = ACHIEVEMENT_WORDS
        .iter()
        .filter(|word| text_lower.contains(*word))
        .count();
    let achievements = (achievement_count as u32).min(5);

    let mut formatting = 0u32;
    if NAME_RE.is_match(text) {
        formatting += 2;
    }
    if YEAR_RE.is_match(text) {
        formatting += 2;
    }
    if PROPER_PAIR_RE.find_iter(text).count() > 2 {
        formatting += 2;
    }
    if text.contains('@') {
        formatting += 2;
    }
    if PHONE_FORMAT_RE.is_match(text) {
        formatting += 2;
    }
    let formatting = formatting.min(10);

    let action_verb_count = ACTION_VERBS
        .iter()
        .filter(|verb| text_lower.contains(*verb))
        .count() as u32;
    let action_verbs = action_verb_count.min(5);

    let numeric_tokens = NUMERIC_TOKEN_RE.find_iter(text).count() as u32;
    let quantified_phrases = QUANTIFIED_PHRASE_RE.find_iter(text).count() as u32;
    let quantification = (numeric_tokens + quantified_phrases).min(5);

    let breakdown = ScoreBreakdown {
        structure,
        grammar,
        readability,
        keywords,
        length,
        contact,
        achievements,
        formatting,
        action_verbs,
        quantification,
    };

    // Fixed ordered checklist; messages are part of the API contract
    let mut issues = Vec::new();
    if found_sections < 3 {
        issues.push("Add standard sections: Summary, Experience, Education, Skills.".to_string());
    }
    if bullet_count < 5 {
        issues.push("Use bullet points to highlight achievements and responsibilities.".to_string());
    }
    if sections.summary.is_empty() {
        issues.push("Add a professional summary or objective statement.".to_string());
    }
    if grammar_errors > 0 {
        issues.push(format!(
            "Fix capitalization and sentence punctuation in {grammar_errors} places."
        ));
    }
    if flesch < 50.0 {
        issues.push("Simplify sentences to improve readability (aim for 60+ Flesch score).".to_string());
    }
    if keywords_found < 3 {
        issues.push("Include more role-relevant keywords and technical skills.".to_string());
    }
    if word_count < 300 {
        issues.push("Resume is too short; add details on projects, achievements, and impact.".to_string());
    } else if word_count > 800 {
        issues.push("Resume is too long; trim to most relevant achievements and experiences.".to_string());
    }
    if contact_info.email.is_none() {
        issues.push("Add a professional email address.".to_string());
    }
    if contact_info.phone.is_none() {
        issues.push("Include a contact phone number.".to_string());
    }
    if contact_info.linkedin.is_none() {
        issues.push("Add your LinkedIn profile URL.".to_string());
    }
    if achievement_count < 2 {
        issues.push("Include more quantifiable achievements and impact statements.".to_string());
    }
    if sections.experience.len() < 2 {
        issues.push("Add more detailed work experience with specific achievements.".to_string());
    }
    if sections.skills.len() < 5 {
        issues.push("Expand your skills section with relevant technical and soft skills.".to_string());
    }
    if formatting < 6 {
        issues.push("Improve formatting consistency and professional presentation.".to_string());
    }
    if action_verb_count < 3 {
        issues.push("Use more strong action verbs to describe your accomplishments.".to_string());
    }
    if quantification < 2 {
        issues.push("Add more numbers, percentages, and metrics to quantify your achievements.".to_string());
    }

    let details = AnalysisDetails {
        word_count,
        sections_found: found_sections as usize,
        has_email: contact_info.email.is_some(),
        has_phone: contact_info.phone.is_some(),
        bullet_count,
        achievement_count,
    };

    Ok(ScoreReport {
        total: breakdown.total(),
        issues,
        breakdown,
        details,
    })
}

/// Placeholder report returned when scoring cannot complete. Values are
/// fixed so retries and tests see identical output; callers flag the
/// response as degraded and must not cache it.
pub fn degraded_report() -> ScoreReport {
    let breakdown = ScoreBreakdown {
        structure: 18,
        grammar: 15,
        readability: 9.0,
        keywords: 8,
        length: 7,
        contact: 6,
        achievements: 3,
        formatting: 6,
        action_verbs: 3,
        quantification: 2,
    };
    ScoreReport {
        total: breakdown.total(),
        issues: vec![
            "Improve overall structure and formatting".to_string(),
            "Add more quantifiable achievements".to_string(),
            "Use stronger action verbs".to_string(),
            "Include more technical keywords".to_string(),
        ],
        details: AnalysisDetails {
            word_count: 550,
            sections_found: 4,
            has_email: true,
            has_phone: true,
            bullet_count: 10,
            achievement_count: 3,
        },
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sections::extract_resume_sections;

    fn score(text: &str) -> ScoreReport {
        let sections = extract_resume_sections(text).unwrap();
        compute_resume_score(text, &sections).unwrap()
    }

    fn make_sections(summary: &str, skills: &[&str]) -> ResumeSections {
        ResumeSections {
            summary: summary.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..ResumeSections::default()
        }
    }

    #[test]
    fn test_structure_counts_sections_and_bullets() {
        let text = "Summary: engineer. Experience\nShipped the full payments platform rewrite.\n\
                    Education\nBS Computer Science, 2020\nSkills python, sql\n- one\n- two\n- three\n";
        let report = score(text);
        assert_eq!(report.details.sections_found, 4);
        assert_eq!(report.details.bullet_count, 3);
        assert_eq!(report.breakdown.structure, 4 * 5 + 3);
    }

    #[test]
    fn test_structure_caps_at_25() {
        let bullets = "- item\n".repeat(12);
        let text = format!(
            "Summary: engineer. Experience\nShipped the full payments platform rewrite.\n\
             Education\nBS Computer Science, 2020\nSkills python, sql\n{bullets}"
        );
        assert_eq!(score(&text).breakdown.structure, 25);
    }

    #[test]
    fn test_grammar_penalizes_lowercase_and_missing_punctuation() {
        let sections = ResumeSections::default();
        // Starts lowercase (1) and the second sentence is a long run-on
        // that also starts lowercase (2 more)
        let text = "this starts wrong. and this one rambles on for quite a while without ever stopping";
        let report = compute_resume_score(text, &sections).unwrap();
        assert_eq!(report.breakdown.grammar, 20 - 3);
        assert!(report
            .issues
            .contains(&"Fix capitalization and sentence punctuation in 3 places.".to_string()));
    }

    #[test]
    fn test_keyword_score_counts_known_terms() {
        let report = compute_resume_score(
            "Worked with python, sql and docker daily",
            &ResumeSections::default(),
        )
        .unwrap();
        assert_eq!(report.breakdown.keywords, 6);
    }

    #[test]
    fn test_keyword_score_caps_at_15() {
        let report = compute_resume_score(
            "python javascript java react node sql aws docker kubernetes git",
            &ResumeSections::default(),
        )
        .unwrap();
        assert_eq!(report.breakdown.keywords, 15);
    }

    #[test]
    fn test_length_score_full_inside_band() {
        let text = "word ".repeat(400);
        let report = compute_resume_score(&text, &ResumeSections::default()).unwrap();
        assert_eq!(report.breakdown.length, 10);
        assert_eq!(report.details.word_count, 400);
    }

    #[test]
    fn test_length_score_falls_off_outside_band() {
        let text = "word ".repeat(100);
        let report = compute_resume_score(&text, &ResumeSections::default()).unwrap();
        // abs(100 - 550) / 50 = 9 off the full 10
        assert_eq!(report.breakdown.length, 1);
    }

    #[test]
    fn test_contact_score_weights() {
        let mut sections = make_sections("", &[]);
        sections.contact.email = Some("a@b.com".to_string());
        sections.contact.phone = Some("5551234567".to_string());
        sections.contact.linkedin = Some("linkedin.com/in/a".to_string());
        let full = compute_resume_score("text", &sections).unwrap();
        assert_eq!(full.breakdown.contact, 10);

        sections.contact.phone = None;
        sections.contact.linkedin = None;
        let email_only = compute_resume_score("text", &sections).unwrap();
        assert_eq!(email_only.breakdown.contact, 4);
    }

    #[test]
    fn test_formatting_signals() {
        let report = compute_resume_score(
            "Jane Doe reachable at jane@example.com or 555-123-4567 since 2023",
            &ResumeSections::default(),
        )
        .unwrap();
        // Name pattern, year, '@', and a formatted phone; only one
        // proper-noun pair so that signal stays off
        assert_eq!(report.breakdown.formatting, 8);
    }

    #[test]
    fn test_quantification_counts_numbers_and_phrases() {
        let report = compute_resume_score(
            "increased by 40% and 3x growth",
            &ResumeSections::default(),
        )
        .unwrap();
        // numeric token "40" plus phrases "increased", "by 40", "3x"
        assert_eq!(report.breakdown.quantification, 4);
    }

    #[test]
    fn test_action_verb_score() {
        let report = compute_resume_score(
            "Built and designed systems, analyzed outcomes",
            &ResumeSections::default(),
        )
        .unwrap();
        assert_eq!(report.breakdown.action_verbs, 3);
    }

    #[test]
    fn test_total_equals_clamped_breakdown_sum() {
        let text = "Summary: engineer. Experience\nDeveloped and led the billing platform team.\n\
                    Education\nBS Computer Science, 2019\nSkills python, sql, docker, react, aws";
        let report = score(text);
        assert_eq!(report.total, report.breakdown.total());
        assert!(report.total <= 100);
    }

    #[test]
    fn test_issue_checklist_order_is_fixed() {
        let report = compute_resume_score("x", &ResumeSections::default()).unwrap();
        assert_eq!(
            report.issues[0],
            "Add standard sections: Summary, Experience, Education, Skills."
        );
        assert_eq!(
            report.issues[1],
            "Use bullet points to highlight achievements and responsibilities."
        );
        assert_eq!(
            report.issues[2],
            "Add a professional summary or objective statement."
        );
    }

    #[test]
    fn test_identical_input_yields_identical_report() {
        let text = "Summary: engineer. Skills python, sql";
        let sections = extract_resume_sections(text).unwrap();
        let first = compute_resume_score(text, &sections).unwrap();
        let second = compute_resume_score(text, &sections).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_resume_gets_too_long_issue() {
        let text = "word ".repeat(900);
        let report = compute_resume_score(&text, &ResumeSections::default()).unwrap();
        assert!(report.issues.contains(
            &"Resume is too long; trim to most relevant achievements and experiences.".to_string()
        ));
        assert!(!report.issues.contains(
            &"Resume is too short; add details on projects, achievements, and impact.".to_string()
        ));
    }

    #[test]
    fn test_missing_contact_issues() {
        let report = compute_resume_score("plain text", &ResumeSections::default()).unwrap();
        assert_eq!(report.breakdown.contact, 0);
        assert!(report
            .issues
            .contains(&"Add a professional email address.".to_string()));
        assert!(report
            .issues
            .contains(&"Include a contact phone number.".to_string()));
        assert!(report
            .issues
            .contains(&"Add your LinkedIn profile URL.".to_string()));
    }

    #[test]
    fn test_three_section_resume_scores_structure() {
        let text = "Experience\nBuilt a Python service.\n\nEducation\nBS Computer Science, 2020\n\n\
                    Skills\npython, sql, docker";
        let sections = extract_resume_sections(text).unwrap();
        assert_eq!(sections.skills, vec!["python", "sql", "docker"]);
        let report = compute_resume_score(text, &sections).unwrap();
        assert!(report.breakdown.structure > 0);
        assert_eq!(report.details.sections_found, 3);
    }

    #[test]
    fn test_degraded_report_is_deterministic() {
        let first = degraded_report();
        let second = degraded_report();
        assert_eq!(first, second);
        assert_eq!(first.total, first.breakdown.total());
        assert_eq!(first.total, 77);
    }
}
