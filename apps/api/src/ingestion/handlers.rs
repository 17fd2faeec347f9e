//! Axum route handlers for resume upload and retrieval.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::{ingest_resume, UploadedResume};
use crate::errors::AppError;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub session_id: Uuid,
    pub page_count: usize,
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(flatten)]
    pub resume: ResumeResponse,
    /// True when this upload discarded an earlier one for the session.
    pub replaced: bool,
}

/// Precondition for every per-session action: a resume must have been uploaded.
pub async fn load_resume(state: &AppState, session_id: Uuid) -> Result<Arc<UploadedResume>, AppError> {
    state.resumes.get(session_id).await.ok_or_else(|| {
        AppError::NotFound(format!("No resume uploaded for session {session_id}"))
    })
}

/// PUT /api/v1/sessions/:session_id/resume
///
/// Multipart upload; the PDF goes in the `file` field.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut pdf_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
            pdf_bytes = Some(bytes);
            break;
        }
    }

    let pdf_bytes = pdf_bytes
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    info!("Processing resume upload for session {session_id} ({} bytes)", pdf_bytes.len());
    let resume = ingest_resume(
        &pdf_bytes,
        state.rasterizer.as_ref(),
        state.gateway.as_ref(),
        state.config.text_source,
    )
    .await?;

    let response = ResumeResponse {
        session_id,
        page_count: resume.page_count,
        text: resume.text.clone(),
        uploaded_at: resume.uploaded_at,
    };
    let replaced = state.resumes.put(session_id, resume).await;

    Ok(Json(UploadResponse {
        resume: response,
        replaced,
    }))
}

/// GET /api/v1/sessions/:session_id/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = load_resume(&state, session_id).await?;
    Ok(Json(ResumeResponse {
        session_id,
        page_count: resume.page_count,
        text: resume.text.clone(),
        uploaded_at: resume.uploaded_at,
    }))
}

/// DELETE /api/v1/sessions/:session_id/resume
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.resumes.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No resume uploaded for session {session_id}"
        )))
    }
}
