//! Resume text extraction: per-page model OCR, or the PDF's embedded text layer.

use tracing::{debug, info};

use super::rasterize::PageImage;
use super::{IngestError, TextSource};
use crate::llm_client::prompts::OCR_PROMPT;
use crate::llm_client::{InlineImage, ModelGateway, Part};

/// Sends each page image to the model in order and concatenates the replies,
/// one trailing newline per page. The first failing page aborts extraction.
pub async fn ocr_pages(
    pages: &[PageImage],
    gateway: &dyn ModelGateway,
) -> Result<String, IngestError> {
    let mut text = String::new();
    for page in pages {
        let parts = [
            Part::text(OCR_PROMPT),
            Part::InlineImage(InlineImage::jpeg(&page.jpeg)),
        ];
        let page_text = gateway
            .generate(&parts)
            .await
            .map_err(|source| IngestError::Ocr {
                page: page.page_number,
                source,
            })?;
        debug!("OCR page {}: {} chars", page.page_number, page_text.len());
        text.push_str(&page_text);
        text.push('\n');
    }
    Ok(text)
}

/// Reads the embedded text layer. Scanned PDFs come back empty.
pub async fn text_layer(pdf_bytes: &[u8]) -> Result<String, IngestError> {
    let bytes = pdf_bytes.to_vec();
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| IngestError::TextLayer(format!("extraction task failed: {e}")))?
        .map_err(|e| IngestError::TextLayer(e.to_string()))
}

pub async fn extract_text(
    source: TextSource,
    pdf_bytes: &[u8],
    pages: &[PageImage],
    gateway: &dyn ModelGateway,
) -> Result<String, IngestError> {
    info!("Extracting resume text via {source}");
    match source {
        TextSource::Ocr => ocr_pages(pages, gateway).await,
        TextSource::TextLayer => text_layer(pdf_bytes).await,
    }
}
