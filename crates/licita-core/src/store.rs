//! Tender persistence.
//!
//! The pipeline only needs two things from storage: hand over a finished
//! tender and get its id back, and read tenders again for profit reports.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{SaveError, StoreError};
use crate::models::tender::{NewTender, Tender, TenderId};

/// Store-level result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Destination for processed tenders.
pub trait TenderSink {
    /// Persist a tender and return its assigned id.
    ///
    /// On failure the tender comes back inside the error.
    fn save(&mut self, tender: NewTender) -> std::result::Result<TenderId, SaveError>;
}

/// Read access to stored tenders.
pub trait TenderSource {
    fn load(&self, id: TenderId) -> Result<Tender>;

    /// Tenders of one owner, ordered by id.
    fn list(&self, owner_id: u64) -> Result<Vec<Tender>>;
}

/// In-memory store, ids start at 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tenders: BTreeMap<TenderId, Tender>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenders.is_empty()
    }
}

impl TenderSink for MemoryStore {
    fn save(&mut self, tender: NewTender) -> std::result::Result<TenderId, SaveError> {
        let id = self.tenders.keys().next_back().map_or(1, |last| last + 1);
        self.tenders.insert(id, tender.with_id(id));
        Ok(id)
    }
}

impl TenderSource for MemoryStore {
    fn load(&self, id: TenderId) -> Result<Tender> {
        self.tenders.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn list(&self, owner_id: u64) -> Result<Vec<Tender>> {
        Ok(self
            .tenders
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

/// Directory of `tender-<id>.json` files.
///
/// Ids are sequential: a new tender gets one more than the highest id on
/// disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: TenderId) -> PathBuf {
        self.dir.join(format!("tender-{}.json", id))
    }

    /// Ids present on disk, ascending. A missing directory holds none.
    pub fn ids(&self) -> Result<Vec<TenderId>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<TenderId> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| parse_id(&entry.file_name().to_string_lossy()))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn write(&self, tender: &NewTender) -> Result<TenderId> {
        fs::create_dir_all(&self.dir)?;
        let id = self.ids()?.last().map_or(1, |last| last + 1);
        let stored = tender.clone().with_id(id);
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(self.path_for(id), json)?;
        Ok(id)
    }
}

fn parse_id(file_name: &str) -> Option<TenderId> {
    file_name
        .strip_prefix("tender-")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

impl TenderSink for JsonStore {
    fn save(&mut self, tender: NewTender) -> std::result::Result<TenderId, SaveError> {
        match self.write(&tender) {
            Ok(id) => {
                info!("Saved tender {} ({}) to {}", id, tender.filename, self.dir.display());
                Ok(id)
            }
            Err(e) => Err(SaveError::new(tender, e)),
        }
    }
}

impl TenderSource for JsonStore {
    fn load(&self, id: TenderId) -> Result<Tender> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        debug!("Loading tender from {}", path.display());
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn list(&self, owner_id: u64) -> Result<Vec<Tender>> {
        let mut tenders = Vec::new();
        for id in self.ids()? {
            let tender = self.load(id)?;
            if tender.owner_id == owner_id {
                tenders.push(tender);
            }
        }
        Ok(tenders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tender::{CategorizedItems, Category, ExtractedItem, TenderStatus};
    use rust_decimal::Decimal;

    fn tender(filename: &str, owner_id: u64) -> NewTender {
        let items: CategorizedItems = std::iter::once(ExtractedItem {
            category: Category::Memory,
            description: "8gb".to_string(),
            quantity: 10,
            unit_price: Decimal::new(250000, 2),
            page_number: 1,
        })
        .collect();
        NewTender::new(filename, owner_id, items)
    }

    #[test]
    fn test_memory_store_sequential_ids() {
        let mut store = MemoryStore::new();
        assert_eq!(store.save(tender("a.pdf", 1)).unwrap(), 1);
        assert_eq!(store.save(tender("b.pdf", 2)).unwrap(), 2);
        assert_eq!(store.len(), 2);

        assert_eq!(store.load(2).unwrap().filename, "b.pdf");
        assert_eq!(store.list(1).unwrap().len(), 1);
        assert!(matches!(store.load(9), Err(StoreError::NotFound(9))));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path().join("tenders"));
        assert!(store.ids().unwrap().is_empty());

        let first = store.save(tender("edital-1.pdf", 1)).unwrap();
        let second = store.save(tender("edital-2.pdf", 1)).unwrap();
        store.save(tender("other.pdf", 2)).unwrap();
        assert_eq!((first, second), (1, 2));
        assert!(dir.path().join("tenders/tender-2.json").exists());

        let loaded = store.load(first).unwrap();
        assert_eq!(loaded.id, 1);
        assert_eq!(loaded.status, TenderStatus::Processed);
        assert_eq!(loaded.items.get(Category::Memory)[0].unit_price, Decimal::new(250000, 2));

        let owned: Vec<TenderId> = store.list(1).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(owned, vec![1, 2]);
    }

    #[test]
    fn test_json_store_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("tender-abc.json"), "{}").unwrap();
        fs::write(dir.path().join("tender-7.json"), "{}").unwrap();

        let store = JsonStore::new(dir.path());
        assert_eq!(store.ids().unwrap(), vec![7]);
        assert!(matches!(store.load(7), Err(StoreError::Serialize(_))));
        assert!(matches!(store.load(3), Err(StoreError::NotFound(3))));
    }

    #[test]
    fn test_failed_save_returns_tender() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let mut store = JsonStore::new(blocker.join("tenders"));
        let err = store.save(tender("keep-me.pdf", 1)).unwrap_err();
        assert!(matches!(err.source, StoreError::Io(_)));
        assert_eq!(err.into_tender().filename, "keep-me.pdf");
    }
}
