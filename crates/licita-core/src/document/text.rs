//! Plain-text documents, e.g. the output of `pdftotext -layout`.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{DocumentReader, Page, Result};
use crate::error::DocumentError;

/// Reader for UTF-8 text files. Form feeds (`\x0c`) separate pages.
pub struct TextReader;

impl TextReader {
    pub fn new() -> Self {
        Self
    }

    /// Split already loaded text into pages.
    pub fn split_pages(text: &str) -> Vec<Page> {
        if text.is_empty() {
            return Vec::new();
        }
        text.split('\x0c')
            .enumerate()
            .map(|(i, page)| Page::new(i as u32 + 1, page))
            .collect()
    }
}

impl Default for TextReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for TextReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<Page>> {
        let text = fs::read_to_string(path).map_err(|e| DocumentError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let pages = Self::split_pages(&text);
        debug!("Text document {}: {} pages", path.display(), pages.len());
        Ok(pages)
    }

    fn name(&self) -> &str {
        "text"
    }
}
