//! Seller catalog models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tags shorter than this never take part in matching.
pub const MIN_TAG_LEN: usize = 2;

/// A seller-owned stock-keeping entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Owning user.
    #[serde(default)]
    pub owner_id: u64,

    /// Display label.
    pub name: String,

    /// Lowercase substrings that claim an extracted item for this product.
    #[serde(with = "tag_list")]
    pub match_tags: Vec<String>,

    /// What the seller pays per unit.
    pub unit_cost: Decimal,

    /// What the seller charges per unit.
    pub unit_sale_price: Decimal,
}

impl CatalogProduct {
    /// Create a product from a comma-separated tag string.
    pub fn new(
        name: impl Into<String>,
        tags: &str,
        unit_cost: Decimal,
        unit_sale_price: Decimal,
    ) -> Self {
        Self {
            owner_id: 0,
            name: name.into(),
            match_tags: parse_tags(tags),
            unit_cost,
            unit_sale_price,
        }
    }

    /// Set the owning user.
    pub fn with_owner(mut self, owner_id: u64) -> Self {
        self.owner_id = owner_id;
        self
    }

    /// Sale price minus cost. May be negative.
    pub fn unit_margin(&self) -> Decimal {
        self.unit_sale_price.saturating_sub(self.unit_cost)
    }

    /// Tags usable for matching: trimmed and at least [`MIN_TAG_LEN`] long.
    pub fn usable_tags(&self) -> impl Iterator<Item = &str> {
        self.match_tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| t.chars().count() >= MIN_TAG_LEN)
    }
}

/// Split a comma-separated tag string into lowercase, trimmed tags.
///
/// Order is kept and repeated tags are dropped.
pub fn parse_tags(tags: &str) -> Vec<String> {
    let mut parsed: Vec<String> = Vec::new();
    for tag in tags.split(',') {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !parsed.contains(&tag) {
            parsed.push(tag);
        }
    }
    parsed
}

/// Tags travel as a single comma-separated string at the storage boundary.
mod tag_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&tags.join(","))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(super::parse_tags(&raw))
    }
}
