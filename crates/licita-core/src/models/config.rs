//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::LicitaError;

/// Main configuration for the licita pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LicitaConfig {
    /// Document scanning configuration.
    pub scanner: ScannerConfig,

    /// Catalog source configuration.
    pub catalog: CatalogConfig,

    /// Tender store configuration.
    pub store: StoreConfig,
}

/// Document scanner and validator thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Lines before a matched line used as price context.
    pub context_before: usize,

    /// Lines after a matched line used as price context.
    pub context_after: usize,

    /// Shortest accepted item description, in characters.
    pub min_description_len: usize,

    /// Smallest plausible monitor size, in inches.
    pub monitor_min_inches: u32,

    /// Largest plausible monitor size, in inches.
    pub monitor_max_inches: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            context_before: 1,
            context_after: 2,
            min_description_len: 3,
            monitor_min_inches: 15,
            monitor_max_inches: 100,
        }
    }
}

/// Where the seller catalog lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON catalog file.
    pub path: PathBuf,

    /// Default owner whose products are matched.
    pub owner_id: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalog.json"),
            owner_id: 1,
        }
    }
}

/// Where processed tenders are stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one JSON file per tender.
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tenders"),
        }
    }
}

impl LicitaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Reject threshold combinations the scanner cannot work with.
    pub fn validate(&self) -> crate::error::Result<()> {
        let scanner = &self.scanner;
        if scanner.min_description_len == 0 {
            return Err(LicitaError::Config(
                "scanner.min_description_len must be at least 1".to_string(),
            ));
        }
        if scanner.monitor_min_inches > scanner.monitor_max_inches {
            return Err(LicitaError::Config(format!(
                "scanner.monitor_min_inches ({}) exceeds scanner.monitor_max_inches ({})",
                scanner.monitor_min_inches, scanner.monitor_max_inches
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LicitaConfig =
            serde_json::from_str(r#"{"scanner": {"context_after": 4}}"#).unwrap();
        assert_eq!(config.scanner.context_after, 4);
        assert_eq!(config.scanner.context_before, 1);
        assert_eq!(config.scanner.monitor_min_inches, 15);
        assert_eq!(config.store.dir, PathBuf::from("tenders"));
    }

    #[test]
    fn test_validate() {
        assert!(LicitaConfig::default().validate().is_ok());

        let mut config = LicitaConfig::default();
        config.scanner.monitor_min_inches = 120;
        assert!(matches!(config.validate(), Err(LicitaError::Config(_))));

        let mut config = LicitaConfig::default();
        config.scanner.min_description_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LicitaConfig::default();
        config.catalog.owner_id = 42;
        config.save(&path).unwrap();

        let loaded = LicitaConfig::from_file(&path).unwrap();
        assert_eq!(loaded.catalog.owner_id, 42);
    }
}
