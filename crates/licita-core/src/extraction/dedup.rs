//! Per-category duplicate removal.

use std::collections::HashSet;

use crate::models::tender::CategorizedItems;

/// Drop items equal to an earlier item of the same category.
///
/// Equality is [`ExtractedItem`](crate::models::tender::ExtractedItem)'s:
/// description, quantity and unit price. The first occurrence survives and
/// relative order is kept. Categories are never compared with each other.
pub fn dedup(items: CategorizedItems) -> CategorizedItems {
    let mut result = CategorizedItems::new();

    for (category, list) in items.into_inner() {
        let mut seen = HashSet::with_capacity(list.len());
        let kept: Vec<_> = list
            .into_iter()
            .filter(|item| seen.insert(item.clone()))
            .collect();
        result.set(category, kept);
    }

    result
}
