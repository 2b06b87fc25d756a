//! Batch ranking of stored resumes against one job posting.
//!
//! Every referenced file is decoded, normalized, and scored. A file
//! that cannot be found or decoded never sinks the batch: it becomes a
//! zero-score sentinel entry carrying the error message, with the full
//! required skill set reported as missing. Results are sorted by score
//! descending (ties keep submission order) and split into the
//! above-threshold list and the complete list.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::normalize::normalize_text;
use crate::decode::{DocFormat, DocumentDecoder};
use crate::errors::AppError;
use crate::matching::scorer::{dedup_skills, match_resume_to_job, JobMatchScore};

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeRef {
    pub resume_path: String,
    #[serde(default)]
    pub seeker_email: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResume {
    pub resume_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeker_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    pub match_score: u32,
    pub skills_match: u32,
    pub description_match: u32,
    pub keywords_match: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RankedResume {
    fn scored(entry: &ResumeRef, score: JobMatchScore) -> Self {
        Self {
            resume_path: entry.resume_path.clone(),
            seeker_email: entry.seeker_email.clone(),
            application_id: entry.application_id.clone(),
            match_score: score.total_score,
            skills_match: score.skills_match,
            description_match: score.description_match,
            keywords_match: score.keywords_match,
            matched_skills: score.matched_skills,
            missing_skills: score.missing_skills,
            error: None,
        }
    }

    fn failed(entry: &ResumeRef, required_skills: &[String], message: String) -> Self {
        Self {
            resume_path: entry.resume_path.clone(),
            seeker_email: entry.seeker_email.clone(),
            application_id: entry.application_id.clone(),
            match_score: 0,
            skills_match: 0,
            description_match: 0,
            keywords_match: 0,
            matched_skills: Vec::new(),
            missing_skills: dedup_skills(required_skills),
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<RankedResume>,
    #[serde(rename = "allResults")]
    pub all_results: Vec<RankedResume>,
    pub threshold: u32,
}

pub async fn rank_resumes(
    decoder: &dyn DocumentDecoder,
    fallback_dirs: &[String],
    entries: &[ResumeRef],
    job_description: &str,
    required_skills: &[String],
    threshold: u32,
) -> BatchOutcome {
    let mut all_results = Vec::with_capacity(entries.len());
    for entry in entries {
        let ranked =
            match score_entry(decoder, fallback_dirs, entry, job_description, required_skills)
                .await
            {
                Ok(score) => RankedResume::scored(entry, score),
                Err(err) => {
                    warn!(path = %entry.resume_path, "batch entry skipped: {err}");
                    RankedResume::failed(entry, required_skills, err.to_string())
                }
            };
        all_results.push(ranked);
    }

    // sort_by is stable, so equal scores keep submission order
    all_results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    let results = all_results
        .iter()
        .filter(|r| r.match_score >= threshold)
        .cloned()
        .collect();

    BatchOutcome {
        results,
        all_results,
        threshold,
    }
}

async fn score_entry(
    decoder: &dyn DocumentDecoder,
    fallback_dirs: &[String],
    entry: &ResumeRef,
    job_description: &str,
    required_skills: &[String],
) -> Result<JobMatchScore, AppError> {
    let path = resolve_resume_file(&entry.resume_path, fallback_dirs)?;
    let format = DocFormat::from_filename(&entry.resume_path)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::Decode(format!("Failed to read {}: {e}", path.display())))?;
    let text = decoder.decode(&bytes, format)?;
    let normalized = normalize_text(&text)?;
    Ok(match_resume_to_job(
        &normalized,
        job_description,
        required_skills,
    ))
}

/// Tries the path as given, then its bare filename under each
/// configured resume directory.
fn resolve_resume_file(given: &str, fallback_dirs: &[String]) -> Result<PathBuf, AppError> {
    let direct = PathBuf::from(given);
    if direct.is_file() {
        return Ok(direct);
    }
    if let Some(name) = direct.file_name() {
        for dir in fallback_dirs {
            let candidate = Path::new(dir).join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }
    Err(AppError::ResumeNotFound(format!(
        "'{given}' was not found at its path or in any configured resume directory"
    )))
}
