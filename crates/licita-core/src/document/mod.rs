//! Document reading: turning an input file into pages of text.

mod pdf;
mod text;

pub use pdf::PdfReader;
pub use text::TextReader;

use std::path::Path;

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Text content of a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text, empty for pages without a text layer.
    pub text: String,
}

impl Page {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Whether the page carries any extractable text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Raw lines of the page, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

/// Trait for document reading implementations.
///
/// Readers fail only when the file itself cannot be read. A readable
/// document with no text (a scanned PDF) yields pages with empty text.
pub trait DocumentReader {
    /// Read all pages of the document at `path`.
    fn read_pages(&self, path: &Path) -> Result<Vec<Page>>;

    /// Name of this reader (for diagnostics).
    fn name(&self) -> &str;
}

/// Pick a reader from the file extension.
pub fn reader_for_path(path: &Path) -> Result<Box<dyn DocumentReader>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(Box::new(PdfReader::new())),
        "txt" => Ok(Box::new(TextReader::new())),
        _ => Err(DocumentError::UnsupportedFormat(extension)),
    }
}

/// Whether a path has an extension some reader handles.
pub fn is_supported(path: &Path) -> bool {
    reader_for_path(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_for_path() {
        assert_eq!(reader_for_path(Path::new("edital.PDF")).unwrap().name(), "pdf");
        assert_eq!(reader_for_path(Path::new("edital.txt")).unwrap().name(), "text");
        assert!(matches!(
            reader_for_path(Path::new("edital.docx")),
            Err(DocumentError::UnsupportedFormat(ext)) if ext == "docx"
        ));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_page_has_text() {
        assert!(Page::new(1, "Item 1").has_text());
        assert!(!Page::new(2, "  \n\t ").has_text());
    }
}
