pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Axum's default 2 MB body cap is below the upload ceiling; leave
    // headroom above it for multipart framing
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes * 2);

    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/resumes/analyze",
            post(analysis::handle_analyze_resume),
        )
        // Match API
        .route("/api/v1/jobs/match", post(matching::handle_match_resumes))
        .layer(body_limit)
        .with_state(state)
}
