//! Line-by-line document scanner.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::document::Page;
use crate::models::config::ScannerConfig;
use crate::models::tender::{CategorizedItems, ExtractedItem};

use super::dedup::dedup;
use super::rules::{context_window, normalize, parse_price, parse_quantity, CategoryRegistry, ItemValidator};
use super::ItemExtractor;

/// A normalized, non-empty line and the page it came from.
struct ScanLine {
    page_number: u32,
    text: String,
}

/// Scanner applying a category registry to every line of a document.
///
/// Pages are flattened into one line sequence, so the price window of the
/// last row on a page can reach into the next page.
pub struct DocumentScanner {
    registry: CategoryRegistry,
    validator: ItemValidator,
    context_before: usize,
    context_after: usize,
}

impl DocumentScanner {
    /// Create a scanner with the given registry and thresholds.
    pub fn new(registry: CategoryRegistry, config: &ScannerConfig) -> Self {
        Self {
            registry,
            validator: ItemValidator::from_config(config),
            context_before: config.context_before,
            context_after: config.context_after,
        }
    }

    /// Scan pages and return deduplicated items per category.
    pub fn scan(&self, pages: &[Page]) -> CategorizedItems {
        dedup(self.scan_raw(pages))
    }

    /// Scan pages without deduplication.
    pub fn scan_raw(&self, pages: &[Page]) -> CategorizedItems {
        let start = Instant::now();
        let lines = collect_lines(pages);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();

        let mut items = CategorizedItems::new();
        let mut rejected = 0usize;

        for (index, line) in lines.iter().enumerate() {
            for (category, snippet) in self.registry.matches(&line.text) {
                let description = normalize(snippet);

                if let Err(reason) = self.validator.check(category, &description) {
                    trace!("Rejected {} '{}': {}", category, description, reason);
                    rejected += 1;
                    continue;
                }

                let window = context_window(&texts, index, self.context_before, self.context_after);
                let unit_price = parse_price(&window);
                let quantity = parse_quantity(&line.text);

                trace!(
                    "Page {}: {} '{}' x{} @ {}",
                    line.page_number, category, description, quantity, unit_price
                );

                items.push(ExtractedItem {
                    category,
                    description,
                    quantity,
                    unit_price,
                    page_number: line.page_number,
                });
            }
        }

        info!(
            "Scanned {} pages ({} lines): {} items, {} rejected in {}ms",
            pages.len(),
            lines.len(),
            items.total_items(),
            rejected,
            start.elapsed().as_millis()
        );

        items
    }
}

fn collect_lines(pages: &[Page]) -> Vec<ScanLine> {
    let mut lines = Vec::new();

    for page in pages {
        if !page.has_text() {
            debug!("Page {} has no extractable text, skipping", page.number);
            continue;
        }

        lines.extend(
            page.lines()
                .map(normalize)
                .filter(|text| !text.is_empty())
                .map(|text| ScanLine {
                    page_number: page.number,
                    text,
                }),
        );
    }

    lines
}

impl Default for DocumentScanner {
    fn default() -> Self {
        Self::new(CategoryRegistry::standard(), &ScannerConfig::default())
    }
}

impl ItemExtractor for DocumentScanner {
    fn extract(&self, pages: &[Page]) -> CategorizedItems {
        self.scan(pages)
    }
}
