//! Axum route handlers for the analysis reports.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::composer::{CoverLetterOptions, ReportKind};
use crate::analysis::reports::{
    analyze_match, generate_cover_letter, generate_report, highlight_resume, KeywordHighlight,
    MatchAnalysis,
};
use crate::errors::{AppError, AppJson};
use crate::ingestion::handlers::load_resume;
use crate::state::AppState;

const COVER_LETTER_FILENAME: &str = "cover_letter.txt";

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub job_description: String,
    #[serde(flatten)]
    pub options: CoverLetterOptions,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub kind: ReportKind,
    pub report: String,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

pub fn require_job_description(text: &str) -> Result<&str, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(text)
}

/// POST /api/v1/sessions/:session_id/analysis
///
/// Full evaluation plus the match score parsed from its leading "XX%" line.
pub async fn handle_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<Json<MatchAnalysis>, AppError> {
    let job_description = require_job_description(&request.job_description)?;
    let resume = load_resume(&state, session_id).await?;
    let analysis = analyze_match(state.gateway.as_ref(), &resume, job_description).await?;
    Ok(Json(analysis))
}

/// POST /api/v1/sessions/:session_id/optimizer/highlight
pub async fn handle_highlight(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    AppJson(request): AppJson<JobDescriptionRequest>,
) -> Result<Json<KeywordHighlight>, AppError> {
    let job_description = require_job_description(&request.job_description)?;
    let resume = load_resume(&state, session_id).await?;
    let highlighted = highlight_resume(state.gateway.as_ref(), &resume.text, job_description).await?;
    Ok(Json(highlighted))
}

/// POST /api/v1/sessions/:session_id/optimizer/suggestions
pub async fn handle_suggestions(
    state: State<AppState>,
    session_id: Path<Uuid>,
    request: AppJson<JobDescriptionRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    report(state, session_id, request, ReportKind::Suggestions).await
}

/// POST /api/v1/sessions/:session_id/interview-prep
pub async fn handle_interview_prep(
    state: State<AppState>,
    session_id: Path<Uuid>,
    request: AppJson<JobDescriptionRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    report(state, session_id, request, ReportKind::InterviewPrep).await
}

/// POST /api/v1/sessions/:session_id/market-position
pub async fn handle_market_position(
    state: State<AppState>,
    session_id: Path<Uuid>,
    request: AppJson<JobDescriptionRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    report(state, session_id, request, ReportKind::MarketPosition).await
}

/// POST /api/v1/sessions/:session_id/skill-plan
pub async fn handle_skill_plan(
    state: State<AppState>,
    session_id: Path<Uuid>,
    request: AppJson<JobDescriptionRequest>,
) -> Result<Json<ReportResponse>, AppError> {
    report(state, session_id, request, ReportKind::SkillPlan).await
}

async fn report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    AppJson(request): AppJson<JobDescriptionRequest>,
    kind: ReportKind,
) -> Result<Json<ReportResponse>, AppError> {
    let job_description = require_job_description(&request.job_description)?;
    let resume = load_resume(&state, session_id).await?;
    let report = generate_report(state.gateway.as_ref(), kind, &resume, job_description).await?;
    Ok(Json(ReportResponse { kind, report }))
}

/// POST /api/v1/sessions/:session_id/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let cover_letter = cover_letter(&state, session_id, &request).await?;
    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/sessions/:session_id/cover-letter/download
///
/// Same generation as above, delivered as a plain-text attachment.
pub async fn handle_cover_letter_download(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    AppJson(request): AppJson<CoverLetterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cover_letter = cover_letter(&state, session_id, &request).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{COVER_LETTER_FILENAME}\""),
            ),
        ],
        cover_letter,
    ))
}

async fn cover_letter(
    state: &AppState,
    session_id: Uuid,
    request: &CoverLetterRequest,
) -> Result<String, AppError> {
    let job_description = require_job_description(&request.job_description)?;
    let resume = load_resume(state, session_id).await?;
    Ok(generate_cover_letter(
        state.gateway.as_ref(),
        &resume,
        job_description,
        &request.options,
    )
    .await?)
}
