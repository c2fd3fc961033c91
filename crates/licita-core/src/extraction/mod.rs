//! Tender item extraction.

mod dedup;
pub mod rules;
mod scanner;

pub use dedup::dedup;
pub use scanner::DocumentScanner;

use crate::document::Page;
use crate::models::tender::CategorizedItems;

/// Trait for item extractors working on document pages.
pub trait ItemExtractor {
    /// Extract deduplicated items from the pages of one document.
    fn extract(&self, pages: &[Page]) -> CategorizedItems;

    /// Extract items from plain text, one page per form feed.
    fn extract_from_text(&self, text: &str) -> CategorizedItems {
        self.extract(&crate::document::TextReader::split_pages(text))
    }
}
