//! Tender data models: item categories, extracted line items and processed tenders.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UnknownCategory;

/// Technical item classification.
///
/// The set is closed. Declaration order is the order categories are scanned
/// and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// CPUs (Intel Core, Ryzen, Xeon).
    Processor,
    /// RAM modules and sizes.
    Memory,
    /// SSD, NVMe and HDD capacity.
    Storage,
    /// Monitors and screen sizes.
    Monitor,
    /// Printers, multifunction devices, toner.
    Printing,
    /// Switches, cabling, racks.
    Network,
    /// UPS units and stabilizers.
    Power,
    /// Keyboards, mice, webcams, headsets.
    Peripherals,
    /// Operating system and office licenses.
    Software,
    /// Warranty terms.
    Warranty,
}

impl Category {
    /// All categories in scan order.
    pub const ALL: [Category; 10] = [
        Category::Processor,
        Category::Memory,
        Category::Storage,
        Category::Monitor,
        Category::Printing,
        Category::Network,
        Category::Power,
        Category::Peripherals,
        Category::Software,
        Category::Warranty,
    ];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Processor => "processor",
            Category::Memory => "memory",
            Category::Storage => "storage",
            Category::Monitor => "monitor",
            Category::Printing => "printing",
            Category::Network => "network",
            Category::Power => "power",
            Category::Peripherals => "peripherals",
            Category::Software => "software",
            Category::Warranty => "warranty",
        }
    }

}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parse a category from its canonical name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recognized technical line item.
///
/// Equality and hashing cover `category`, `description`, `quantity` and
/// `unit_price` only. Two hits of the same item on different pages are the
/// same item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Category the item was recognized under.
    pub category: Category,

    /// Normalized matched text snippet.
    pub description: String,

    /// Quantity requested by the tender (at least 1).
    pub quantity: u32,

    /// Government-estimated unit price, zero when none was found.
    pub unit_price: Decimal,

    /// 1-based page the item was found on.
    pub page_number: u32,
}

impl ExtractedItem {
    /// Government estimate for the whole line (quantity × unit price).
    /// Saturates instead of overflowing.
    pub fn line_estimate(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

impl PartialEq for ExtractedItem {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.description == other.description
            && self.quantity == other.quantity
            && self.unit_price == other.unit_price
    }
}

impl Eq for ExtractedItem {}

impl Hash for ExtractedItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.description.hash(state);
        self.quantity.hash(state);
        self.unit_price.hash(state);
    }
}

/// Extracted items grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorizedItems(BTreeMap<Category, Vec<ExtractedItem>>);

impl CategorizedItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to its category.
    pub fn push(&mut self, item: ExtractedItem) {
        self.0.entry(item.category).or_default().push(item);
    }

    /// Items of one category, empty if none were found.
    pub fn get(&self, category: Category) -> &[ExtractedItem] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of items across all categories.
    pub fn total_items(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// True when no category holds any item.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Categories that hold at least one item, with their items.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[ExtractedItem])> {
        self.0
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(category, items)| (*category, items.as_slice()))
    }

    /// All items in category order, then in extraction order.
    pub fn iter_items(&self) -> impl Iterator<Item = &ExtractedItem> {
        self.0.values().flatten()
    }

    /// Sum of all line estimates, saturating.
    pub fn total_estimate(&self) -> Decimal {
        self.iter_items()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.line_estimate()))
    }

    /// Replace the items of one category.
    pub(crate) fn set(&mut self, category: Category, items: Vec<ExtractedItem>) {
        if items.is_empty() {
            self.0.remove(&category);
        } else {
            self.0.insert(category, items);
        }
    }

    pub(crate) fn into_inner(self) -> BTreeMap<Category, Vec<ExtractedItem>> {
        self.0
    }
}

impl FromIterator<ExtractedItem> for CategorizedItems {
    fn from_iter<I: IntoIterator<Item = ExtractedItem>>(iter: I) -> Self {
        let mut items = CategorizedItems::new();
        for item in iter {
            items.push(item);
        }
        items
    }
}

/// Identifier assigned to a tender by the store.
pub type TenderId = u64;

/// Outcome recorded for a processed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    /// At least one item was extracted.
    #[default]
    Processed,
    /// The document was read but held no recognizable items.
    Empty,
}

/// A tender ready to be persisted, before the store assigns it an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTender {
    /// Source file name.
    pub filename: String,

    /// Owning user.
    pub owner_id: u64,

    /// Processing status.
    pub status: TenderStatus,

    /// When the document was processed.
    pub processed_at: DateTime<Utc>,

    /// Deduplicated items by category.
    pub items: CategorizedItems,
}

impl NewTender {
    /// Build a tender from freshly extracted items.
    pub fn new(filename: impl Into<String>, owner_id: u64, items: CategorizedItems) -> Self {
        let status = if items.is_empty() {
            TenderStatus::Empty
        } else {
            TenderStatus::Processed
        };
        Self {
            filename: filename.into(),
            owner_id,
            status,
            processed_at: Utc::now(),
            items,
        }
    }

    /// Attach the id assigned by a store.
    pub fn with_id(self, id: TenderId) -> Tender {
        Tender {
            id,
            filename: self.filename,
            owner_id: self.owner_id,
            status: self.status,
            processed_at: self.processed_at,
            items: self.items,
        }
    }
}

/// A processed document as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tender {
    /// Store-assigned identifier.
    pub id: TenderId,

    /// Source file name.
    pub filename: String,

    /// Owning user.
    pub owner_id: u64,

    /// Processing status.
    pub status: TenderStatus,

    /// When the document was processed.
    pub processed_at: DateTime<Utc>,

    /// Deduplicated items by category.
    pub items: CategorizedItems,
}
