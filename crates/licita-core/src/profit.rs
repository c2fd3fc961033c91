//! Profit projection over extracted items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogMatcher;
use crate::models::catalog::CatalogProduct;
use crate::models::tender::{CategorizedItems, Category, ExtractedItem};

/// One extracted item reconciled against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRecord {
    pub category: Category,
    pub description: String,
    pub quantity: u32,
    /// Government estimated unit price.
    pub gov_unit_price: Decimal,
    pub matched_product: Option<String>,
    pub matched_sale_price: Option<Decimal>,
    pub unit_margin: Decimal,
    /// quantity × government unit price.
    pub line_gov_estimate: Decimal,
    /// quantity × unit margin, zero when unmatched.
    pub line_projected_profit: Decimal,
}

impl MatchedRecord {
    /// Match one item against `catalog` and compute its line figures.
    pub fn from_item(item: &ExtractedItem, catalog: &[CatalogProduct]) -> Self {
        let result = CatalogMatcher::find_match(&item.description, catalog);
        Self {
            category: item.category,
            description: item.description.clone(),
            quantity: item.quantity,
            gov_unit_price: item.unit_price,
            matched_product: result.matched_product.map(|p| p.name.clone()),
            matched_sale_price: result.matched_product.map(|p| p.unit_sale_price),
            unit_margin: result.unit_margin(),
            line_gov_estimate: item.line_estimate(),
            line_projected_profit: result.line_profit(item.quantity),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched_product.is_some()
    }
}

/// Contract-level sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitTotals {
    pub item_count: usize,
    pub matched_count: usize,
    pub total_gov_estimate: Decimal,
    pub total_projected_profit: Decimal,
}

/// Line records plus their totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitReport {
    pub records: Vec<MatchedRecord>,
    pub totals: ProfitTotals,
}

/// Match every item and sum the line figures.
///
/// Margins come from `catalog` as passed in; nothing is cached between calls.
pub fn aggregate(items: &CategorizedItems, catalog: &[CatalogProduct]) -> ProfitReport {
    let records: Vec<MatchedRecord> = items
        .iter_items()
        .map(|item| MatchedRecord::from_item(item, catalog))
        .collect();

    let totals = records.iter().fold(ProfitTotals::default(), |mut totals, record| {
        totals.item_count += 1;
        if record.is_matched() {
            totals.matched_count += 1;
        }
        totals.total_gov_estimate = totals.total_gov_estimate.saturating_add(record.line_gov_estimate);
        totals.total_projected_profit = totals.total_projected_profit.saturating_add(record.line_projected_profit);
        totals
    });

    ProfitReport { records, totals }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(category: Category, description: &str, quantity: u32, price: i64) -> ExtractedItem {
        ExtractedItem {
            category,
            description: description.to_string(),
            quantity,
            unit_price: Decimal::new(price, 2),
            page_number: 1,
        }
    }

    #[test]
    fn test_aggregate_totals() {
        let items: CategorizedItems = vec![
            item(Category::Processor, "i5-10400", 10, 250000),
            item(Category::Storage, "ssd 256gb", 4, 30000),
        ]
        .into_iter()
        .collect();
        let catalog = vec![CatalogProduct::new(
            "Notebook Dell",
            "i5,8gb",
            Decimal::new(1000, 0),
            Decimal::new(1500, 0),
        )];

        let report = aggregate(&items, &catalog);

        assert_eq!(report.records.len(), 2);
        let processor = &report.records[0];
        assert_eq!(processor.matched_product.as_deref(), Some("Notebook Dell"));
        assert_eq!(processor.matched_sale_price, Some(Decimal::new(1500, 0)));
        assert_eq!(processor.line_gov_estimate, Decimal::new(25000, 0));
        assert_eq!(processor.line_projected_profit, Decimal::new(5000, 0));

        let storage = &report.records[1];
        assert!(!storage.is_matched());
        assert_eq!(storage.unit_margin, Decimal::ZERO);

        assert_eq!(report.totals.item_count, 2);
        assert_eq!(report.totals.matched_count, 1);
        assert_eq!(report.totals.total_gov_estimate, Decimal::new(26200, 0));
        assert_eq!(report.totals.total_projected_profit, Decimal::new(5000, 0));
    }

    #[test]
    fn test_margins_follow_catalog() {
        let items: CategorizedItems = std::iter::once(item(Category::Power, "nobreak", 2, 0)).collect();
        let cheap = vec![CatalogProduct::new("UPS", "nobreak", Decimal::new(100, 0), Decimal::new(150, 0))];
        let dear = vec![CatalogProduct::new("UPS", "nobreak", Decimal::new(100, 0), Decimal::new(300, 0))];

        assert_eq!(aggregate(&items, &cheap).totals.total_projected_profit, Decimal::new(100, 0));
        assert_eq!(aggregate(&items, &dear).totals.total_projected_profit, Decimal::new(400, 0));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let mut webcam = item(Category::Peripherals, "webcam full hd", 9000, 0);
        webcam.unit_price = Decimal::MAX;
        let items: CategorizedItems = vec![webcam, item(Category::Peripherals, "mouse optico", 2, 5000)]
            .into_iter()
            .collect();
        let catalog = vec![CatalogProduct::new("Webcam", "webcam", Decimal::ZERO, Decimal::MAX)];

        let report = aggregate(&items, &catalog);

        assert_eq!(report.records[0].line_gov_estimate, Decimal::MAX);
        assert_eq!(report.records[0].line_projected_profit, Decimal::MAX);
        assert_eq!(report.totals.total_gov_estimate, Decimal::MAX);
        assert_eq!(report.totals.total_projected_profit, Decimal::MAX);
    }

    #[test]
    fn test_empty_report() {
        let report = aggregate(&CategorizedItems::new(), &[]);
        assert!(report.records.is_empty());
        assert_eq!(report.totals, ProfitTotals::default());
    }
}
