//! Document Ingestion — PDF bytes to a first-page image plus resume text.
//!
//! Flow: validate → rasterize all pages → keep page 1 as the inline image →
//!       extract text (model OCR per page, or the embedded text layer).

pub mod handlers;
pub mod rasterize;
pub mod store;
pub mod text;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::llm_client::{InlineImage, LlmError, ModelGateway};
use rasterize::PageRasterizer;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Uploaded file is not a PDF")]
    NotAPdf,

    #[error("PDF produced no pages")]
    NoPages,

    #[error("Rasterizer failed: {0}")]
    Rasterizer(String),

    #[error("Rasterizer timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction failed on page {page}: {source}")]
    Ocr { page: usize, source: LlmError },

    #[error("Text layer extraction failed: {0}")]
    TextLayer(String),
}

/// Where the resume's display text comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextSource {
    /// One model call per page image.
    #[default]
    Ocr,
    /// Embedded PDF text, no model calls.
    TextLayer,
}

impl FromStr for TextSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ocr" => Ok(TextSource::Ocr),
            "text_layer" | "text-layer" => Ok(TextSource::TextLayer),
            other => Err(format!("unknown text source '{other}' (expected ocr or text_layer)")),
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::Ocr => f.write_str("ocr"),
            TextSource::TextLayer => f.write_str("text_layer"),
        }
    }
}

/// A processed upload. Replaced wholesale on the next upload for the same session.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    /// First page only; this is what the model sees alongside every task prompt.
    pub first_page: InlineImage,
    pub page_count: usize,
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

pub async fn ingest_resume(
    pdf_bytes: &[u8],
    rasterizer: &dyn PageRasterizer,
    gateway: &dyn ModelGateway,
    text_source: TextSource,
) -> Result<UploadedResume, IngestError> {
    if !pdf_bytes.starts_with(PDF_MAGIC) {
        return Err(IngestError::NotAPdf);
    }

    let pages = rasterizer.rasterize(pdf_bytes).await?;
    let first = pages.first().ok_or(IngestError::NoPages)?;
    let first_page = InlineImage::jpeg(&first.jpeg);
    info!("Rasterized resume: {} page(s)", pages.len());

    let text = text::extract_text(text_source, pdf_bytes, &pages, gateway).await?;

    Ok(UploadedResume {
        first_page,
        page_count: pages.len(),
        text,
        uploaded_at: Utc::now(),
    })
}
