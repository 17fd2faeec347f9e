use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingestion::IngestError;
use crate::llm_client::LlmError;
use crate::search::SearchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Upstream failures carry the upstream message through to the client; the
/// caller decides what to show. Only internal errors are masked.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => llm_failure(e),
            AppError::Ingest(e) => ingest_failure(e),
            AppError::Search(e) => search_failure(e),
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

/// JSON body extractor whose rejections (bad syntax, missing fields, values out
/// of a field's range) come back as `VALIDATION_ERROR` like every other input error.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

fn llm_failure(e: &LlmError) -> (StatusCode, &'static str, String) {
    if e.is_rate_limited() {
        tracing::warn!("LLM rate limited: {e}");
        (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED", e.to_string())
    } else {
        tracing::error!("LLM error: {e}");
        (StatusCode::BAD_GATEWAY, "LLM_ERROR", e.to_string())
    }
}

fn ingest_failure(e: &IngestError) -> (StatusCode, &'static str, String) {
    match e {
        IngestError::NotAPdf => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
        IngestError::Ocr { source, .. } => {
            let (status, code, _) = llm_failure(source);
            (status, code, e.to_string())
        }
        IngestError::Io(io) => {
            tracing::error!("Ingestion I/O error: {io}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            )
        }
        IngestError::NoPages
        | IngestError::Rasterizer(_)
        | IngestError::Timeout { .. }
        | IngestError::TextLayer(_) => {
            tracing::warn!("Ingestion failed: {e}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INGESTION_ERROR",
                e.to_string(),
            )
        }
    }
}

fn search_failure(e: &SearchError) -> (StatusCode, &'static str, String) {
    match e {
        SearchError::MissingApiKey => (
            StatusCode::SERVICE_UNAVAILABLE,
            "CONFIGURATION_ERROR",
            e.to_string(),
        ),
        SearchError::Llm(source) => llm_failure(source),
        SearchError::Http(_) | SearchError::Parse(_) | SearchError::TitleNotFound => {
            tracing::error!("Search failed: {e}");
            (StatusCode::BAD_GATEWAY, "SEARCH_ERROR", e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_and_code(err: AppError) -> (StatusCode, String) {
        let (status, code, _) = match &err {
            AppError::Llm(e) => llm_failure(e),
            AppError::Ingest(e) => ingest_failure(e),
            AppError::Search(e) => search_failure(e),
            _ => unreachable!("only upstream errors are classified here"),
        };
        (status, code.to_string())
    }

    #[test]
    fn test_rate_limited_llm_maps_to_429() {
        let err = AppError::from(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted (e.g. check quota).".to_string(),
        });
        assert_eq!(
            status_and_code(err),
            (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED".to_string())
        );
    }

    #[test]
    fn test_other_llm_failure_maps_to_bad_gateway() {
        let err = AppError::from(LlmError::EmptyContent);
        assert_eq!(
            status_and_code(err),
            (StatusCode::BAD_GATEWAY, "LLM_ERROR".to_string())
        );
    }

    #[test]
    fn test_ocr_failure_keeps_llm_classification() {
        let err = AppError::from(IngestError::Ocr {
            page: 2,
            source: LlmError::Api {
                status: 429,
                message: "rate limit".to_string(),
            },
        });
        assert_eq!(status_and_code(err).0, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_missing_search_key_is_configuration_error() {
        let err = AppError::from(SearchError::MissingApiKey);
        assert_eq!(
            status_and_code(err),
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "CONFIGURATION_ERROR".to_string()
            )
        );
    }

    #[test]
    fn test_not_a_pdf_is_validation_error() {
        let response = AppError::from(IngestError::NotAPdf).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
