//! LLM Client — the single point of entry for all generative-model calls in ResAi.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Pipelines depend on the `ModelGateway` trait; `GeminiClient` is the HTTP backend.
//!
//! No retries and no fallback model: a failed call is reported to the caller as-is.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

#[cfg(test)]
pub mod testing;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Quota exhaustion is only detectable from the message text; the upstream
    /// status code is not relied upon.
    pub fn is_rate_limited(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("429") || message.contains("quota") || message.contains("rate limit")
    }
}

/// A base64-encoded image sent inline with a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub fn jpeg(bytes: &[u8]) -> Self {
        use base64::Engine;
        Self {
            mime_type: "image/jpeg".to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// One ordered piece of a model request.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineImage(InlineImage),
}

impl Part {
    pub fn text(value: impl Into<String>) -> Self {
        Part::Text(value.into())
    }
}

/// The seam every pipeline talks to. `GeminiClient` in production, a scripted fake in tests.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends the ordered parts as a single user turn and returns the reply text.
    async fn generate(&self, parts: &[Part]) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'a str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: &'a InlineImage },
}

impl<'a> From<&'a Part> for WirePart<'a> {
    fn from(part: &'a Part) -> Self {
        match part {
            Part::Text(text) => WirePart::Text { text },
            Part::InlineImage(image) => WirePart::InlineData { inline_data: image },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, rename = "usageMetadata")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default, rename = "promptTokenCount")]
    pub prompt_tokens: u32,
    #[serde(default, rename = "candidatesTokenCount")]
    pub candidate_tokens: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client. One model, configured at startup.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
                .build()?,
            api_key: config.google_api_key.clone(),
            api_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(&self, parts: &[Part]) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![WireContent {
                role: "user",
                parts: parts.iter().map(WirePart::from).collect(),
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &body.usage {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_tokens, usage.candidate_tokens
            );
        }

        body.text().ok_or(LlmError::EmptyContent)
    }
}

const STATUS_MESSAGE_LIMIT: usize = 50;

/// Outcome of a liveness round-trip to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ModelStatus {
    Available,
    UnexpectedResponse,
    RateLimited,
    Error { message: String },
}

pub async fn probe_status(gateway: &dyn ModelGateway) -> ModelStatus {
    match gateway.generate(&[Part::text(prompts::STATUS_PROBE)]).await {
        Ok(reply) if reply.to_lowercase().contains("ok") => ModelStatus::Available,
        Ok(_) => ModelStatus::UnexpectedResponse,
        Err(e) if e.is_rate_limited() => ModelStatus::RateLimited,
        Err(e) => ModelStatus::Error {
            message: e.to_string().chars().take(STATUS_MESSAGE_LIMIT).collect(),
        },
    }
}
