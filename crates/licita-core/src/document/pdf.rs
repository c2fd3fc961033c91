//! PDF text extraction using lopdf and pdf-extract.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{DocumentReader, Page, Result};
use crate::error::DocumentError;

/// PDF reader returning the embedded text layer page by page.
///
/// No OCR is attempted: image-only pages come back with empty text.
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Read pages from PDF bytes already in memory.
    pub fn read_bytes(&self, data: &[u8], path: &Path) -> Result<Vec<Page>> {
        let raw = load_plain(data, path)?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        // pdf-extract panics on some malformed fonts and content streams
        let texts = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&raw)
        }))
        .map_err(|payload| {
            warn!("pdf-extract panicked on {}", path.display());
            DocumentError::TextExtraction(panic_message(payload.as_ref()))
        })?
        .map_err(|e| DocumentError::TextExtraction(e.to_string()))?;

        let pages: Vec<Page> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(i as u32 + 1, text))
            .collect();

        let with_text = pages.iter().filter(|p| p.has_text()).count();
        debug!(
            "PDF {}: {} pages, {} with a text layer",
            path.display(),
            pages.len(),
            with_text
        );

        Ok(pages)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown error".to_string());
    format!("text extraction aborted: {}", detail)
}

/// Parse the document and return unencrypted bytes for text extraction.
///
/// Returns `None` for a document with no pages.
fn load_plain(data: &[u8], path: &Path) -> Result<Option<Vec<u8>>> {
    let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let raw = if doc.is_encrypted() {
        // Many tenders are "protected" with an empty user password
        if doc.decrypt("").is_err() {
            return Err(DocumentError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted).map_err(|e| DocumentError::Unreadable {
            path: path.to_path_buf(),
            reason: format!("failed to save decrypted PDF: {}", e),
        })?;
        decrypted
    } else {
        data.to_vec()
    };

    let page_count = doc.get_pages().len();
    trace!("Loaded PDF with {} pages", page_count);
    if page_count == 0 {
        return Ok(None);
    }

    Ok(Some(raw))
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for PdfReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<Page>> {
        let data = fs::read(path).map_err(|e| DocumentError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.read_bytes(&data, path)
    }

    fn name(&self) -> &str {
        "pdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_unreadable() {
        let reader = PdfReader::new();
        let err = reader
            .read_pages(Path::new("/nonexistent/edital.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Unreadable { .. }));
    }

    #[test]
    fn test_corrupt_bytes_are_unreadable() {
        let reader = PdfReader::new();
        let err = reader
            .read_bytes(b"this is not a pdf", Path::new("broken.pdf"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Unreadable { .. }));
    }
}
