//! Noise suppression for candidate items.
//!
//! The category patterns are permissive on purpose. The validator drops the
//! candidates that are clearly not items; it is a heuristic filter and lets
//! some garbage through.

use std::fmt;

use super::patterns::FIRST_NUMBER;
use crate::models::config::ScannerConfig;
use crate::models::tender::Category;

/// Administrative vocabulary that never names a technical item.
pub const DENYLIST: &[&str] = &[
    "licitacao",
    "licitação",
    "pregao",
    "pregão",
    "edital",
    "cnpj",
];

/// Text-layer garbage seen around storage requirements.
pub const GARBLED_STORAGE: &[&str] = &["idade com ssd"];

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Shorter than the configured minimum.
    TooShort(usize),
    /// Contains an administrative term.
    Denylisted(&'static str),
    /// Screen size outside the plausible range.
    ImplausibleSize(u32),
    /// Size written with a leading zero ("00", "05").
    DegenerateSize(String),
    /// Known garbled phrase.
    Garbled(&'static str),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooShort(len) => write!(f, "too short ({} chars)", len),
            Rejection::Denylisted(term) => write!(f, "administrative term '{}'", term),
            Rejection::ImplausibleSize(size) => write!(f, "implausible size {}", size),
            Rejection::DegenerateSize(token) => write!(f, "degenerate size '{}'", token),
            Rejection::Garbled(phrase) => write!(f, "garbled text '{}'", phrase),
        }
    }
}

/// Candidate item validator.
#[derive(Debug, Clone)]
pub struct ItemValidator {
    min_len: usize,
    monitor_min_inches: u32,
    monitor_max_inches: u32,
}

impl ItemValidator {
    /// Create a validator with default thresholds.
    pub fn new() -> Self {
        Self::from_config(&ScannerConfig::default())
    }

    /// Create a validator from scanner configuration.
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self {
            min_len: config.min_description_len,
            monitor_min_inches: config.monitor_min_inches,
            monitor_max_inches: config.monitor_max_inches,
        }
    }

    /// Set the minimum description length.
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Check a normalized description.
    pub fn check(&self, category: Category, description: &str) -> Result<(), Rejection> {
        let len = description.chars().count();
        if len < self.min_len {
            return Err(Rejection::TooShort(len));
        }

        if let Some(term) = DENYLIST.iter().find(|t| description.contains(*t)) {
            return Err(Rejection::Denylisted(*term));
        }

        match category {
            Category::Monitor => self.check_monitor(description),
            Category::Storage => match GARBLED_STORAGE.iter().find(|p| description.contains(*p)) {
                Some(phrase) => Err(Rejection::Garbled(*phrase)),
                None => Ok(()),
            },
            _ => Ok(()),
        }
    }

    /// Whether a normalized description is an acceptable item.
    pub fn is_valid(&self, category: Category, description: &str) -> bool {
        self.check(category, description).is_ok()
    }

    fn check_monitor(&self, description: &str) -> Result<(), Rejection> {
        // Descriptions without a size ("monitor led", "full hd") pass
        let Some(token) = FIRST_NUMBER.find(description) else {
            return Ok(());
        };
        let token = token.as_str();

        if token.len() > 1 && token.starts_with('0') {
            return Err(Rejection::DegenerateSize(token.to_string()));
        }

        match token.parse::<u32>() {
            Ok(size) if size >= self.monitor_min_inches && size <= self.monitor_max_inches => Ok(()),
            Ok(size) => Err(Rejection::ImplausibleSize(size)),
            Err(_) => Err(Rejection::DegenerateSize(token.to_string())),
        }
    }
}

impl Default for ItemValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length() {
        let validator = ItemValidator::new();
        assert!(validator.is_valid(Category::Memory, "8gb"));
        assert_eq!(validator.check(Category::Memory, "8g"), Err(Rejection::TooShort(2)));

        let strict = ItemValidator::new().with_min_len(4);
        assert!(!strict.is_valid(Category::Memory, "8gb"));
    }

    #[test]
    fn test_denylist() {
        let validator = ItemValidator::new();
        assert_eq!(
            validator.check(Category::Software, "office 2021 conforme edital"),
            Err(Rejection::Denylisted("edital"))
        );
        assert!(!validator.is_valid(Category::Network, "cnpj 12"));
    }

    #[test]
    fn test_monitor_sizes() {
        let validator = ItemValidator::new();
        assert!(validator.is_valid(Category::Monitor, "monitor led 24 polegadas"));
        assert!(validator.is_valid(Category::Monitor, "23,8 polegadas"));
        assert!(validator.is_valid(Category::Monitor, "monitor led"));
        assert_eq!(
            validator.check(Category::Monitor, "monitor led 00 polegadas"),
            Err(Rejection::DegenerateSize("00".to_string()))
        );
        assert_eq!(
            validator.check(Category::Monitor, "10 polegadas"),
            Err(Rejection::ImplausibleSize(10))
        );
        assert_eq!(
            validator.check(Category::Monitor, "monitor 150 pol"),
            Err(Rejection::ImplausibleSize(150))
        );
    }

    #[test]
    fn test_size_rule_only_for_monitors() {
        let validator = ItemValidator::new();
        assert!(validator.is_valid(Category::Memory, "4gb"));
        assert!(validator.is_valid(Category::Network, "rack 05u"));
    }

    #[test]
    fn test_garbled_storage() {
        let validator = ItemValidator::new();
        assert_eq!(
            validator.check(Category::Storage, "capacidade com ssd 240gb"),
            Err(Rejection::Garbled("idade com ssd"))
        );
        assert!(validator.is_valid(Category::Storage, "ssd 240gb"));
    }
}
