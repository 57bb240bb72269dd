//! Document text extraction: turns uploaded resume files into plain text for the matcher.
//!
//! Carried in `AppState` as `Arc<dyn DocumentExtractor>` so handlers never depend on a
//! specific file format backend. Default: `PdfExtractor`.

use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(&self, file_name: &str, bytes: Bytes) -> Result<String, AppError>;
}

/// PDF text extraction via `pdf-extract`.
///
/// Each upload is written into its own `TempDir`, removed on drop whether or not
/// extraction succeeds. Parsing is CPU-bound and runs inside `spawn_blocking`.
pub struct PdfExtractor;

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(&self, file_name: &str, bytes: Bytes) -> Result<String, AppError> {
        let name = file_name.to_string();
        tokio::task::spawn_blocking(move || extract_pdf_sync(&name, &bytes))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            })?
    }
}

fn extract_pdf_sync(file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    let dir = tempfile::tempdir().context("Failed to create temporary upload directory")?;
    let path = dir.path().join(safe_file_name(file_name));
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to stage upload '{file_name}'"))?;

    let text = pdf_extract::extract_text(&path)
        .map_err(|e| AppError::Extraction(format!("{file_name}: {e}")))?;

    debug!(file = file_name, chars = text.len(), "Extracted PDF text");
    Ok(text)
}

/// Strips any directory components a client put in the upload name.
fn safe_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload.pdf")
        .to_string()
}

/// Case-insensitive `.pdf` extension check used to filter uploads.
pub fn is_pdf_file_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
