//! End-to-end operations over documents.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use crate::document::{reader_for_path, DocumentReader};
use crate::error::{LicitaError, Result};
use crate::extraction::DocumentScanner;
use crate::models::catalog::CatalogProduct;
use crate::models::tender::CategorizedItems;
use crate::profit::{aggregate, ProfitReport};

/// What scanning a readable document produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// At least one item was found.
    Extracted(CategorizedItems),
    /// The document had no text or no recognizable items.
    Empty,
}

impl ProcessOutcome {
    /// Items found, empty for [`ProcessOutcome::Empty`].
    pub fn into_items(self) -> CategorizedItems {
        match self {
            ProcessOutcome::Extracted(items) => items,
            ProcessOutcome::Empty => CategorizedItems::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ProcessOutcome::Empty)
    }
}

/// Read a document and scan it for items.
///
/// Only an unreadable document is an error.
pub fn process_document(
    path: &Path,
    reader: &dyn DocumentReader,
    scanner: &DocumentScanner,
) -> Result<ProcessOutcome> {
    let start = Instant::now();
    info!("Processing {} with {} reader", path.display(), reader.name());

    let pages = reader.read_pages(path)?;
    let items = scanner.scan(&pages);

    info!(
        "{}: {} items in {} categories ({}ms)",
        path.display(),
        items.total_items(),
        items.categories().count(),
        start.elapsed().as_millis()
    );

    if items.is_empty() {
        Ok(ProcessOutcome::Empty)
    } else {
        Ok(ProcessOutcome::Extracted(items))
    }
}

/// Per-document result of a batch run.
#[derive(Debug)]
pub enum BatchOutcome {
    Processed { path: PathBuf, outcome: ProcessOutcome },
    Failed { path: PathBuf, error: LicitaError },
}

impl BatchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            BatchOutcome::Processed { path, .. } | BatchOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BatchOutcome::Failed { .. })
    }
}

/// Process documents one after another, picking a reader per extension.
///
/// A failing document is recorded and the batch moves on.
pub fn process_batch<P: AsRef<Path>>(paths: &[P], scanner: &DocumentScanner) -> Vec<BatchOutcome> {
    process_batch_with(paths, scanner, |_, _| {})
}

/// [`process_batch`] with a callback after each document.
pub fn process_batch_with<P, F>(paths: &[P], scanner: &DocumentScanner, mut on_done: F) -> Vec<BatchOutcome>
where
    P: AsRef<Path>,
    F: FnMut(usize, &BatchOutcome),
{
    let mut outcomes = Vec::with_capacity(paths.len());

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        let result = reader_for_path(path)
            .map_err(LicitaError::from)
            .and_then(|reader| process_document(path, reader.as_ref(), scanner));

        let outcome = match result {
            Ok(outcome) => BatchOutcome::Processed {
                path: path.to_path_buf(),
                outcome,
            },
            Err(error) => {
                warn!("Failed to process {}: {}", path.display(), error);
                BatchOutcome::Failed {
                    path: path.to_path_buf(),
                    error,
                }
            }
        };

        on_done(index, &outcome);
        outcomes.push(outcome);
    }

    outcomes
}

/// Match items against a catalog and compute profit figures.
pub fn match_and_aggregate(items: &CategorizedItems, catalog: &[CatalogProduct]) -> ProfitReport {
    aggregate(items, catalog)
}
