use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::llm_client::{probe_status, ModelStatus};
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resai-api",
        "active_sessions": state.resumes.len().await
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub model: String,
    #[serde(flatten)]
    pub status: ModelStatus,
}

/// GET /api/v1/model/status
/// Round-trips a tiny prompt to the model. Always 200; the body carries the verdict.
pub async fn model_status_handler(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let status = probe_status(state.gateway.as_ref()).await;
    Json(ModelStatusResponse {
        model: state.config.gemini_model.clone(),
        status,
    })
}
