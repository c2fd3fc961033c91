//! Category recognition patterns.
//!
//! A [`CategoryRegistry`] is an explicit, immutable list of
//! `(category, pattern)` pairs handed to the scanner. Patterns run over
//! normalized (lowercase, single-spaced) text and favour recall: anything
//! that looks like an item is captured, and the validator throws out the
//! noise afterwards.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{LicitaError, Result};
use crate::models::tender::Category;

/// Canonical pattern source per category.
///
/// - processor: Intel model numbers (`i5-10400`), Ryzen families, Xeon and
///   the low-end Intel lines. A bare "intel core i5" counts too.
/// - memory: power-of-two sizes followed by `gb` (optionally with the DDR
///   generation), or a bare DDR generation.
/// - storage: SSD/NVMe/HD with an explicit capacity. Capacity is what the
///   catalog matches on, so bare "ssd" is not an item.
/// - monitor: monitor with a size in inches first, so the validator can
///   judge the size; bare panel type and "full hd" as fallbacks.
/// - printing: multifunction devices, laser/ink-tank printers, toner models.
/// - network: port-counted switches, category 6 cabling, rack units, patch
///   cords, access points.
/// - power: UPS ("nobreak") with its VA rating, bare UPS, stabilizers.
/// - peripherals: ABNT keyboards, optical mice, webcams, headsets.
/// - software: Windows Pro/Home editions and dated Office suites.
/// - warranty: "<n> meses|anos de garantia", tolerating a spelled-out
///   number in parentheses ("12 (doze) meses de garantia").
pub const STANDARD_PATTERNS: &[(Category, &str)] = &[
    (
        Category::Processor,
        r"\b(?:i[3579]-\d{4,5}[a-z]{0,2}|ryzen \d(?: \d{4}[a-z]{0,2})?|intel core i[3579]|xeon(?: [a-z]-?\d{4}[a-z]?)?|celeron|pentium)\b",
    ),
    (
        Category::Memory,
        r"\b(?:(?:4|8|16|32|64|128) ?gb(?: ddr[3-5])?|ddr[3-5])\b",
    ),
    (
        Category::Storage,
        r"\b(?:ssd|nvme|hdd|hd) (?:de )?\d+ ?(?:gb|tb)\b",
    ),
    (
        Category::Monitor,
        r#"\bmonitor (?:led |lcd |ips )?\d{1,3}(?:[.,]\d)? ?(?:polegadas|pol\b|")|\b\d{1,3}(?:[.,]\d)? ?polegadas\b|\bmonitor (?:led|lcd|ips)\b|\bfull ?hd\b"#,
    ),
    (
        Category::Printing,
        r"\b(?:multifuncional|impressora (?:laser|tanque|jato de tinta)|toner [a-z0-9-]+)",
    ),
    (
        Category::Network,
        r"\b(?:switch (?:de )?\d+ portas|cat ?6a?|rack (?:de )?\d+ ?u|patch ?cord|access point)\b",
    ),
    (
        Category::Power,
        r"\b(?:nobreak (?:de )?\d+(?:[.,]\d+)? ?k?va|nobreak|estabilizador)\b",
    ),
    (
        Category::Peripherals,
        r"\b(?:teclado (?:abnt2?|usb)|mouse (?:optico|óptico|usb)|webcam|headset(?: usb)?)\b",
    ),
    (
        Category::Software,
        r"\b(?:windows 1[01] (?:pro|professional|home)|office (?:20\d{2}|365))\b",
    ),
    (
        Category::Warranty,
        r"\b\d+ (?:\([^)]*\) )?(?:meses|anos) de garantia\b",
    ),
];

lazy_static! {
    static ref STANDARD: Vec<CategoryPattern> = STANDARD_PATTERNS
        .iter()
        .map(|(category, pattern)| CategoryPattern {
            category: *category,
            regex: Regex::new(pattern).unwrap(),
        })
        .collect();
}

/// One category bound to its compiled pattern.
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    pub category: Category,
    pub regex: Regex,
}

/// Ordered category → pattern table.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    patterns: Vec<CategoryPattern>,
}

impl CategoryRegistry {
    /// Build a registry from already compiled patterns, kept in order.
    pub fn new(patterns: Vec<CategoryPattern>) -> Self {
        Self { patterns }
    }

    /// The canonical registry covering every category.
    pub fn standard() -> Self {
        Self::new(STANDARD.clone())
    }

    /// Compile a registry from pattern sources.
    pub fn from_patterns(sources: &[(Category, &str)]) -> Result<Self> {
        let patterns = sources
            .iter()
            .map(|(category, pattern)| {
                Regex::new(pattern)
                    .map(|regex| CategoryPattern {
                        category: *category,
                        regex,
                    })
                    .map_err(|source| LicitaError::Pattern {
                        category: category.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(patterns))
    }

    /// Standard registry narrowed to the given categories.
    pub fn only(categories: &[Category]) -> Self {
        Self::new(
            STANDARD
                .iter()
                .filter(|p| categories.contains(&p.category))
                .cloned()
                .collect(),
        )
    }

    /// Test every pattern against `line`.
    ///
    /// Each pattern contributes its leftmost match, so one line can yield
    /// hits in several categories.
    pub fn matches<'a>(&'a self, line: &'a str) -> impl Iterator<Item = (Category, &'a str)> + 'a {
        self.patterns
            .iter()
            .filter_map(move |p| p.regex.find(line).map(|m| (p.category, m.as_str())))
    }

    /// Categories in registry order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.patterns.iter().map(|p| p.category)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(line: &str) -> Vec<(Category, String)> {
        CategoryRegistry::standard()
            .matches(line)
            .map(|(c, s)| (c, s.to_string()))
            .collect()
    }

    fn hit(line: &str, category: Category) -> Option<String> {
        hits(line).into_iter().find(|(c, _)| *c == category).map(|(_, s)| s)
    }

    #[test]
    fn test_standard_covers_all_categories() {
        let registry = CategoryRegistry::standard();
        let categories: Vec<Category> = registry.categories().collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_one_line_many_categories() {
        let found = hits("10 notebook i5-10400 8gb ssd 256gb r$ 2.500,00");
        assert_eq!(
            found,
            vec![
                (Category::Processor, "i5-10400".to_string()),
                (Category::Memory, "8gb".to_string()),
                (Category::Storage, "ssd 256gb".to_string()),
            ]
        );
    }

    #[test]
    fn test_processor_patterns() {
        assert_eq!(hit("processador intel core i7 ou superior", Category::Processor).as_deref(), Some("intel core i7"));
        assert_eq!(hit("amd ryzen 5 5600g", Category::Processor).as_deref(), Some("ryzen 5 5600g"));
        assert_eq!(hit("i7-1255u", Category::Processor).as_deref(), Some("i7-1255u"));
        assert_eq!(hit("servidor xeon", Category::Processor).as_deref(), Some("xeon"));
    }

    #[test]
    fn test_memory_ignores_storage_capacity_suffix() {
        assert_eq!(hit("ssd 256gb", Category::Memory), None);
        assert_eq!(hit("memória 16 gb ddr4", Category::Memory).as_deref(), Some("16 gb ddr4"));
        assert_eq!(hit("padrão ddr5", Category::Memory).as_deref(), Some("ddr5"));
    }

    #[test]
    fn test_monitor_prefers_sized_form() {
        assert_eq!(
            hit("monitor led 00 polegadas", Category::Monitor).as_deref(),
            Some("monitor led 00 polegadas")
        );
        assert_eq!(hit("monitor led full hd", Category::Monitor).as_deref(), Some("monitor led"));
        assert_eq!(hit("tela de 23,8 polegadas", Category::Monitor).as_deref(), Some("23,8 polegadas"));
    }

    #[test]
    fn test_other_categories() {
        assert_eq!(hit("nobreak 1.5 kva bivolt", Category::Power).as_deref(), Some("nobreak 1.5 kva"));
        assert_eq!(hit("switch 24 portas gerenciável", Category::Network).as_deref(), Some("switch 24 portas"));
        assert_eq!(hit("cabo cat6 azul", Category::Network).as_deref(), Some("cat6"));
        assert_eq!(hit("teclado abnt2 usb", Category::Peripherals).as_deref(), Some("teclado abnt2"));
        assert_eq!(hit("licença windows 11 pro", Category::Software).as_deref(), Some("windows 11 pro"));
        assert_eq!(hit("impressora laser mono", Category::Printing).as_deref(), Some("impressora laser"));
        assert_eq!(
            hit("12 (doze) meses de garantia on-site", Category::Warranty).as_deref(),
            Some("12 (doze) meses de garantia")
        );
    }

    #[test]
    fn test_from_patterns_narrowed() {
        let registry = CategoryRegistry::from_patterns(&[(Category::Power, r"nobreak")]).unwrap();
        assert_eq!(registry.len(), 1);
        let found: Vec<_> = registry.matches("nobreak e ssd 240gb").collect();
        assert_eq!(found, vec![(Category::Power, "nobreak")]);
    }

    #[test]
    fn test_from_patterns_invalid() {
        let err = CategoryRegistry::from_patterns(&[(Category::Memory, r"(gb")]).unwrap_err();
        assert!(matches!(err, LicitaError::Pattern { ref category, .. } if category == "memory"));
    }

    #[test]
    fn test_only() {
        let registry = CategoryRegistry::only(&[Category::Storage, Category::Monitor]);
        let categories: Vec<Category> = registry.categories().collect();
        assert_eq!(categories, vec![Category::Storage, Category::Monitor]);
    }
}
