//! Section extraction for resume text.
//!
//! Sections are located by an ordered list of rules. Each rule pairs a
//! label pattern with a boundary pattern and a capture strategy; the
//! first rule whose label matches wins and later rules for that section
//! are skipped. The captured block runs from the end of the label match
//! to the earliest occurrence of any boundary label, or to the end of
//! the text. A section whose rules never match stays empty; extraction
//! itself never rejects a document.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Contact patterns
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?1[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})").unwrap()
});

static LINKEDIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Section labels
// ────────────────────────────────────────────────────────────────────────────

static SUMMARY_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:summary|objective|profile|about)[\s:]*").unwrap());

static SUMMARY_ALT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:professional\s+summary|career\s+objective)[\s:]*").unwrap()
});

static EXPERIENCE_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:experience|work\s+history|employment)[\s:]*").unwrap()
});

static EDUCATION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:education|academic|qualification)[\s:]*").unwrap()
});

static SKILLS_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:skills|technical\s+skills|competencies)[\s:]*").unwrap()
});

static SKILLS_ALT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:programming\s+languages|technologies)[\s:]*").unwrap()
});

// Boundary alternations: the four section labels minus the section's own.
static SUMMARY_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)experience|education|skills|projects").unwrap());

static EXPERIENCE_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)education|skills|projects").unwrap());

static EDUCATION_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)experience|skills|projects").unwrap());

static SKILLS_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)experience|education|projects").unwrap());

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Matcher rules
// ────────────────────────────────────────────────────────────────────────────

/// How a captured block is carved into section content.
#[derive(Clone, Copy)]
enum CaptureStrategy {
    /// Keep the whole block as trimmed prose.
    Prose,
    /// Split on blank lines, keep entries longer than `min_len` chars.
    BlankLineEntries { min_len: usize },
    /// Split on commas, semicolons, and newlines, keep tokens longer than `min_len` chars.
    DelimitedTokens { min_len: usize },
}

enum SectionContent {
    Prose(String),
    Items(Vec<String>),
}

struct SectionRule {
    label: &'static LazyLock<Regex>,
    boundary: &'static LazyLock<Regex>,
    strategy: CaptureStrategy,
}

impl SectionRule {
    fn apply(&self, text: &str) -> Option<SectionContent> {
        let label = self.label.find(text)?;
        let start = label.end();
        let end = self
            .boundary
            .find(&text[start..])
            .map(|m| start + m.start())
            .unwrap_or(text.len());
        let block = &text[start..end];

        Some(match self.strategy {
            CaptureStrategy::Prose => SectionContent::Prose(block.trim().to_string()),
            CaptureStrategy::BlankLineEntries { min_len } => SectionContent::Items(
                BLANK_LINE_RE
                    .split(block)
                    .map(str::trim)
                    .filter(|entry| entry.chars().count() > min_len)
                    .map(str::to_string)
                    .collect(),
            ),
            CaptureStrategy::DelimitedTokens { min_len } => SectionContent::Items(
                block
                    .split([',', ';', '\n'])
                    .map(str::trim)
                    .filter(|token| token.chars().count() > min_len)
                    .map(str::to_string)
                    .collect(),
            ),
        })
    }
}

static SUMMARY_RULES: [SectionRule; 2] = [
    SectionRule {
        label: &SUMMARY_LABEL_RE,
        boundary: &SUMMARY_BOUNDARY_RE,
        strategy: CaptureStrategy::Prose,
    },
    SectionRule {
        label: &SUMMARY_ALT_LABEL_RE,
        boundary: &SUMMARY_BOUNDARY_RE,
        strategy: CaptureStrategy::Prose,
    },
];

static EXPERIENCE_RULES: [SectionRule; 1] = [SectionRule {
    label: &EXPERIENCE_LABEL_RE,
    boundary: &EXPERIENCE_BOUNDARY_RE,
    strategy: CaptureStrategy::BlankLineEntries { min_len: 20 },
}];

static EDUCATION_RULES: [SectionRule; 1] = [SectionRule {
    label: &EDUCATION_LABEL_RE,
    boundary: &EDUCATION_BOUNDARY_RE,
    strategy: CaptureStrategy::BlankLineEntries { min_len: 10 },
}];

static SKILLS_RULES: [SectionRule; 2] = [
    SectionRule {
        label: &SKILLS_LABEL_RE,
        boundary: &SKILLS_BOUNDARY_RE,
        strategy: CaptureStrategy::DelimitedTokens { min_len: 1 },
    },
    SectionRule {
        label: &SKILLS_ALT_LABEL_RE,
        boundary: &SKILLS_BOUNDARY_RE,
        strategy: CaptureStrategy::DelimitedTokens { min_len: 1 },
    },
];

fn apply_rules(text: &str, rules: &[SectionRule]) -> Option<SectionContent> {
    rules.iter().find_map(|rule| rule.apply(text))
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub contact: ContactInfo,
    pub summary: String,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub achievements: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts contact details and the standard resume sections.
/// Unrecognized sections come back empty rather than failing the call.
pub fn extract_resume_sections(text: &str) -> Result<ResumeSections, AppError> {
    extract_inner(text).map_err(|e| AppError::Extraction(e.to_string()))
}

fn extract_inner(text: &str) -> anyhow::Result<ResumeSections> {
    let mut sections = ResumeSections {
        contact: extract_contact(text),
        ..ResumeSections::default()
    };

    if let Some(SectionContent::Prose(summary)) = apply_rules(text, &SUMMARY_RULES) {
        sections.summary = summary;
    }
    if let Some(SectionContent::Items(entries)) = apply_rules(text, &EXPERIENCE_RULES) {
        sections.experience = entries;
    }
    if let Some(SectionContent::Items(entries)) = apply_rules(text, &EDUCATION_RULES) {
        sections.education = entries;
    }
    if let Some(SectionContent::Items(tokens)) = apply_rules(text, &SKILLS_RULES) {
        sections.skills = tokens;
    }

    Ok(sections)
}

fn extract_contact(text: &str) -> ContactInfo {
    let mut contact = ContactInfo::default();

    if let Some(m) = EMAIL_RE.find(text) {
        contact.email = Some(m.as_str().to_string());
    }
    if let Some(caps) = PHONE_RE.captures(text) {
        // Concatenate the captured groups so "(555) 123-4567" and
        // "555.123.4567" collapse to the same digit string.
        let joined: String = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect();
        contact.phone = Some(joined);
    }
    if let Some(m) = LINKEDIN_RE.find(text) {
        contact.linkedin = Some(m.as_str().to_string());
    }
    contact
}
