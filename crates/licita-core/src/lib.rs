//! Core library for procurement tender analysis.
//!
//! This crate provides:
//! - Document reading (PDF text layer, plain text)
//! - Technical line item extraction with quantities and unit prices
//! - Catalog matching and profit projection
//! - Tender persistence

pub mod catalog;
pub mod document;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pipeline;
pub mod profit;
pub mod store;

pub use catalog::{CatalogMatcher, CatalogSource, JsonCatalog, MatchResult, MemoryCatalog};
pub use document::{reader_for_path, DocumentReader, Page, PdfReader, TextReader};
pub use error::{DocumentError, LicitaError, Result, SaveError, StoreError, UnknownCategory};
pub use extraction::rules::CategoryRegistry;
pub use extraction::{DocumentScanner, ItemExtractor};
pub use models::catalog::CatalogProduct;
pub use models::config::LicitaConfig;
pub use models::tender::{Category, CategorizedItems, ExtractedItem, NewTender, Tender, TenderId, TenderStatus};
pub use pipeline::{match_and_aggregate, process_batch, process_document, BatchOutcome, ProcessOutcome};
pub use profit::{aggregate, MatchedRecord, ProfitReport, ProfitTotals};
pub use store::{JsonStore, MemoryStore, TenderSink, TenderSource};
