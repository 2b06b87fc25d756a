//! Axum route handlers for the job-match API.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::batch::{rank_resumes, BatchOutcome, ResumeRef};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobMatchRequest {
    pub job_description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub resumes: Vec<ResumeRef>,
    #[serde(default)]
    pub threshold: u32,
}

/// POST /api/v1/jobs/match
pub async fn handle_match_resumes(
    State(state): State<AppState>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<BatchOutcome>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let outcome = rank_resumes(
        state.decoder.as_ref(),
        &state.config.resume_dirs,
        &request.resumes,
        &request.job_description,
        &request.required_skills,
        request.threshold,
    )
    .await;

    info!(
        total = outcome.all_results.len(),
        above_threshold = outcome.results.len(),
        threshold = outcome.threshold,
        "ranked resume batch"
    );
    Ok(Json(outcome))
}
