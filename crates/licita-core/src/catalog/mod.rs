//! Seller catalogs and item matching.

mod matcher;

pub use matcher::{CatalogMatcher, MatchResult};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LicitaError, Result};
use crate::models::catalog::CatalogProduct;

/// Source of an owner's catalog products.
///
/// Products must come back in stored order: the matcher picks the first
/// compatible product, so order decides ties.
pub trait CatalogSource {
    /// Products owned by `owner_id`, in stored order.
    fn products_for(&self, owner_id: u64) -> Result<Vec<CatalogProduct>>;
}

/// Catalog read from a JSON array of products.
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every product in the file, regardless of owner.
    pub fn load_all(&self) -> Result<Vec<CatalogProduct>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            LicitaError::Catalog(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            LicitaError::Catalog(format!("invalid catalog {}: {}", self.path.display(), e))
        })
    }
}

impl CatalogSource for JsonCatalog {
    fn products_for(&self, owner_id: u64) -> Result<Vec<CatalogProduct>> {
        let products: Vec<CatalogProduct> = self
            .load_all()?
            .into_iter()
            .filter(|p| p.owner_id == owner_id)
            .collect();
        debug!(
            "Loaded {} products for owner {} from {}",
            products.len(),
            owner_id,
            self.path.display()
        );
        Ok(products)
    }
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Vec<CatalogProduct>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    pub fn add(&mut self, product: CatalogProduct) {
        self.products.push(product);
    }
}

impl CatalogSource for MemoryCatalog {
    fn products_for(&self, owner_id: u64) -> Result<Vec<CatalogProduct>> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }
}
