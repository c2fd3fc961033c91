//! Error types for the licita-core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::tender::NewTender;

/// A category name that is not one of [`Category::ALL`](crate::models::tender::Category::ALL).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

/// Main error type for the licita library.
#[derive(Error, Debug)]
pub enum LicitaError {
    /// Document reading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Tender persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Catalog loading error.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// A category pattern failed to compile.
    #[error("invalid pattern for {category}: {source}")]
    Pattern {
        category: String,
        #[source]
        source: regex::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning an input file into pages of text.
///
/// These are the only hard failures of the extraction pipeline; malformed
/// text inside a readable document never produces an error.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be opened or parsed.
    #[error("failed to read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// Text extraction failed on a document that did parse.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// No reader handles this file extension.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to tender persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the store.
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize a stored tender.
    #[error("failed to serialize tender: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The requested tender does not exist.
    #[error("tender {0} not found")]
    NotFound(u64),
}

/// A failed save, carrying the tender back so the caller can retry.
#[derive(Error, Debug)]
#[error("failed to save tender '{}': {source}", .tender.filename)]
pub struct SaveError {
    pub tender: Box<NewTender>,
    #[source]
    pub source: StoreError,
}

impl SaveError {
    pub fn new(tender: NewTender, source: StoreError) -> Self {
        Self {
            tender: Box::new(tender),
            source,
        }
    }

    /// Recover the unsaved tender.
    pub fn into_tender(self) -> NewTender {
        *self.tender
    }
}

impl From<SaveError> for LicitaError {
    fn from(err: SaveError) -> Self {
        LicitaError::Store(err.source)
    }
}

/// Result type for the licita library.
pub type Result<T> = std::result::Result<T, LicitaError>;
