//! Axum route handler for job search.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::render::render_markdown;
use super::{find_jobs, SearchOutcome, DEFAULT_RESULT_COUNT, MAX_RESULT_COUNT};
use crate::analysis::handlers::require_job_description;
use crate::ingestion::handlers::load_resume;
use crate::errors::{AppError, AppJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub job_description: String,
    #[serde(default = "default_count")]
    pub count: u8,
}

fn default_count() -> u8 {
    DEFAULT_RESULT_COUNT
}

#[derive(Debug, Serialize)]
pub struct SearchResponseBody {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    pub markdown: String,
}

/// POST /api/v1/sessions/:session_id/search
///
/// A "no results" outcome is a 200 with `outcome = "no_results"`; hard failures are errors.
pub async fn handle_search(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    AppJson(request): AppJson<SearchRequest>,
) -> Result<Json<SearchResponseBody>, AppError> {
    let job_description = require_job_description(&request.job_description)?;
    if !(1..=MAX_RESULT_COUNT).contains(&request.count) {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_RESULT_COUNT}"
        )));
    }
    let resume = load_resume(&state, session_id).await?;

    let outcome = find_jobs(
        state.search.as_ref(),
        state.gateway.as_ref(),
        &resume.text,
        job_description,
        request.count,
    )
    .await?;
    let markdown = render_markdown(&outcome);

    Ok(Json(SearchResponseBody { outcome, markdown }))
}
