//! Page rasterization, delegated to poppler's `pdftoppm`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use super::IngestError;

/// One rendered page, JPEG-encoded.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_number: usize,
    pub jpeg: Vec<u8>,
}

/// Turns PDF bytes into one JPEG per page, in page order.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<PageImage>, IngestError>;
}

#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    pub executable_path: String,
    pub dpi: u32,
    pub timeout: Duration,
}

impl PdftoppmRasterizer {
    pub fn new(executable_path: String, dpi: u32, timeout: Duration) -> Self {
        Self {
            executable_path,
            dpi,
            timeout,
        }
    }
}

#[async_trait]
impl PageRasterizer for PdftoppmRasterizer {
    async fn rasterize(&self, pdf_bytes: &[u8]) -> Result<Vec<PageImage>, IngestError> {
        let temp_dir = tempfile::Builder::new()
            .prefix("resai-raster-")
            .tempdir()?;

        let input_path: PathBuf = temp_dir.path().join("resume.pdf");
        tokio::fs::write(&input_path, pdf_bytes).await?;

        let mut command = Command::new(&self.executable_path);
        command
            .arg("-jpeg")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(&input_path)
            .arg(temp_dir.path().join("page"))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(IngestError::Timeout {
                    secs: self.timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            return Err(IngestError::Rasterizer(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let pages = collect_pages(temp_dir.path()).await?;
        debug!("Rasterized {} page(s) at {} dpi", pages.len(), self.dpi);
        Ok(pages)
    }
}

/// Reads `page-N.jpg` files back in page order. pdftoppm zero-pads the page
/// number to a uniform width, so name order is page order.
async fn collect_pages(dir: &Path) -> Result<Vec<PageImage>, IngestError> {
    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_page_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut pages = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        pages.push(PageImage {
            page_number: index + 1,
            jpeg: tokio::fs::read(path).await?,
        });
    }
    Ok(pages)
}

fn is_page_image(path: &Path) -> bool {
    let stem_ok = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.starts_with("page-"))
        .unwrap_or(false);
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg"))
        .unwrap_or(false);
    stem_ok && ext_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_page_image_matches_pdftoppm_names() {
        assert!(is_page_image(Path::new("/tmp/x/page-1.jpg")));
        assert!(is_page_image(Path::new("/tmp/x/page-01.jpg")));
        assert!(!is_page_image(Path::new("/tmp/x/resume.pdf")));
        assert!(!is_page_image(Path::new("/tmp/x/cover-1.jpg")));
    }

    #[tokio::test]
    async fn test_collect_pages_orders_by_page_number() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("page-02.jpg"), b"second")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("page-01.jpg"), b"first")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("page-10.jpg"), b"tenth")
            .await
            .unwrap();
        tokio::fs::write(dir.path().join("resume.pdf"), b"%PDF")
            .await
            .unwrap();

        let pages = collect_pages(dir.path()).await.unwrap();
        let bodies: Vec<&[u8]> = pages.iter().map(|p| p.jpeg.as_slice()).collect();
        assert_eq!(bodies, vec![&b"first"[..], &b"second"[..], &b"tenth"[..]]);
        assert_eq!(pages[2].page_number, 3);
    }

    #[tokio::test]
    async fn test_missing_executable_is_an_io_error() {
        let rasterizer = PdftoppmRasterizer::new(
            "/nonexistent/pdftoppm".to_string(),
            72,
            Duration::from_secs(5),
        );
        let result = rasterizer.rasterize(b"%PDF-1.4").await;
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
