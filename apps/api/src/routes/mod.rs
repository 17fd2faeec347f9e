pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::ingestion::handlers as ingestion;
use crate::search::handlers as search;
use crate::state::AppState;

/// Resume PDFs only; anything larger is rejected before ingestion.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/model/status", get(health::model_status_handler))
        // Document ingestion
        .route(
            "/api/v1/sessions/:session_id/resume",
            put(ingestion::handle_upload_resume)
                .get(ingestion::handle_get_resume)
                .delete(ingestion::handle_delete_resume)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Reports
        .route(
            "/api/v1/sessions/:session_id/analysis",
            post(analysis::handle_analysis),
        )
        .route(
            "/api/v1/sessions/:session_id/optimizer/highlight",
            post(analysis::handle_highlight),
        )
        .route(
            "/api/v1/sessions/:session_id/optimizer/suggestions",
            post(analysis::handle_suggestions),
        )
        .route(
            "/api/v1/sessions/:session_id/cover-letter",
            post(analysis::handle_cover_letter),
        )
        .route(
            "/api/v1/sessions/:session_id/cover-letter/download",
            post(analysis::handle_cover_letter_download),
        )
        .route(
            "/api/v1/sessions/:session_id/interview-prep",
            post(analysis::handle_interview_prep),
        )
        .route(
            "/api/v1/sessions/:session_id/market-position",
            post(analysis::handle_market_position),
        )
        .route(
            "/api/v1/sessions/:session_id/skill-plan",
            post(analysis::handle_skill_plan),
        )
        // Search augmentation
        .route(
            "/api/v1/sessions/:session_id/search",
            post(search::handle_search),
        )
        .with_state(state)
}
