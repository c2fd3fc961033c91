//! Tag-based catalog matching.

use rust_decimal::Decimal;
use tracing::trace;

use crate::models::catalog::CatalogProduct;

/// Outcome of matching one item description against a catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub matched_product: Option<&'a CatalogProduct>,
}

impl<'a> MatchResult<'a> {
    pub fn unmatched() -> Self {
        Self { matched_product: None }
    }

    pub fn is_match(&self) -> bool {
        self.matched_product.is_some()
    }

    /// Sale price minus cost of the matched product, zero when unmatched.
    pub fn unit_margin(&self) -> Decimal {
        self.matched_product
            .map(CatalogProduct::unit_margin)
            .unwrap_or(Decimal::ZERO)
    }

    /// Projected profit for `quantity` units, saturating.
    pub fn line_profit(&self, quantity: u32) -> Decimal {
        self.unit_margin().saturating_mul(Decimal::from(quantity))
    }
}

/// Matches item descriptions to catalog products.
///
/// The first product in catalog order with any usable tag contained in the
/// lowercased description wins. There is no scoring.
pub struct CatalogMatcher;

impl CatalogMatcher {
    pub fn find_match<'a>(description: &str, catalog: &'a [CatalogProduct]) -> MatchResult<'a> {
        let description = description.to_lowercase();

        for product in catalog {
            if let Some(tag) = product.usable_tags().find(|tag| description.contains(tag)) {
                trace!("'{}' matched '{}' on tag '{}'", description, product.name, tag);
                return MatchResult {
                    matched_product: Some(product),
                };
            }
        }

        MatchResult::unmatched()
    }
}
