//! Axum route handlers for the resume analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::normalize::normalize_text;
use crate::analysis::scoring::{
    compute_resume_score, degraded_report, AnalysisDetails, ScoreBreakdown, ScoreReport,
};
use crate::analysis::sections::{extract_resume_sections, ResumeSections};
use crate::cache::content_hash;
use crate::decode::DocFormat;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub cached: bool,
    pub degraded: bool,
    pub score: u32,
    pub professionalism_score: ScoreBreakdown,
    pub analysis_details: AnalysisDetails,
    pub issues: Vec<String>,
    pub sections: ResumeSections,
    pub message: String,
}

/// POST /api/v1/resumes/analyze
///
/// Multipart upload with a single `file` field. Identical bytes replay
/// the cached result; extraction or scoring failures fall back to a
/// deterministic degraded report instead of an error response.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = read_resume_field(&mut multipart).await?;
    if upload.bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::Validation(format!(
            "File size exceeds the {} byte limit",
            state.config.max_upload_bytes
        )));
    }
    let format = DocFormat::from_filename(&upload.filename)?;
    let digest = content_hash(&upload.bytes);

    // Cache replay happens before any decoding work
    match state.cache.get(&digest).await {
        Ok(Some(stored)) => match serde_json::from_str::<AnalyzeResponse>(&stored) {
            Ok(mut response) => {
                info!(filename = %upload.filename, "analysis served from cache");
                response.cached = true;
                return Ok(Json(response));
            }
            Err(e) => warn!("Discarding unreadable cache entry {digest}: {e}"),
        },
        Ok(None) => {}
        Err(e) => warn!("Cache read failed for {digest}: {e}"),
    }

    let (report, sections, degraded) = match run_pipeline(&state, &upload.bytes, format) {
        Ok((report, sections)) => (report, sections, false),
        Err(AppError::Extraction(msg)) | Err(AppError::ScoreComputation(msg)) => {
            warn!(filename = %upload.filename, "falling back to degraded analysis: {msg}");
            (degraded_report(), ResumeSections::default(), true)
        }
        Err(other) => return Err(other),
    };

    let message = if degraded {
        "Automated analysis could not fully process this document; scores are placeholders."
    } else {
        "Resume analyzed successfully!"
    };
    let response = AnalyzeResponse {
        success: true,
        cached: false,
        degraded,
        score: report.total,
        professionalism_score: report.breakdown,
        analysis_details: report.details,
        issues: report.issues,
        sections,
        message: message.to_string(),
    };

    // Degraded results are placeholders and must not be replayed
    if !degraded {
        if let Err(e) = store_result(&state, &digest, &response).await {
            warn!("Cache write failed for {digest}: {e}");
        }
    }

    info!(
        filename = %upload.filename,
        score = response.score,
        degraded = response.degraded,
        "resume analyzed"
    );
    Ok(Json(response))
}

/// Runs decode → normalize → extract → score as one fallible unit, so
/// an Extraction failure at any stage takes the same degraded path.
fn run_pipeline(
    state: &AppState,
    bytes: &[u8],
    format: DocFormat,
) -> Result<(ScoreReport, ResumeSections), AppError> {
    let text = state.decoder.decode(bytes, format)?;
    let normalized = normalize_text(&text)?;
    analyze_text(&normalized)
}

fn analyze_text(normalized: &str) -> Result<(ScoreReport, ResumeSections), AppError> {
    let sections = extract_resume_sections(normalized)?;
    let report = compute_resume_score(normalized, &sections)?;
    Ok((report, sections))
}

struct ResumeUpload {
    filename: String,
    bytes: Bytes,
}

async fn read_resume_field(multipart: &mut Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_owned)
                .ok_or_else(|| {
                    AppError::Validation("Uploaded file must have a filename".to_string())
                })?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            return Ok(ResumeUpload { filename, bytes });
        }
    }
    Err(AppError::Validation(
        "Missing 'file' field in multipart upload".to_string(),
    ))
}

async fn store_result(
    state: &AppState,
    digest: &str,
    response: &AnalyzeResponse,
) -> anyhow::Result<()> {
    let serialized = serde_json::to_string(response)?;
    state.cache.put(digest, &serialized).await
}
