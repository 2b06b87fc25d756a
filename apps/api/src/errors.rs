#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Empty document: no usable text after normalization")]
    EmptyDocument,

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Score computation failed: {0}")]
    ScoreComputation(String),

    #[error("Resume not found: {0}")]
    ResumeNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::Decode(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DECODE_ERROR",
                msg.clone(),
            ),
            AppError::EmptyDocument => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_DOCUMENT",
                "No usable text could be extracted from the document".to_string(),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::ScoreComputation(msg) => {
                tracing::error!("Score computation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SCORE_COMPUTATION_ERROR",
                    "Scoring failed for this document".to_string(),
                )
            }
            AppError::ResumeNotFound(msg) => {
                (StatusCode::NOT_FOUND, "RESUME_NOT_FOUND", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
