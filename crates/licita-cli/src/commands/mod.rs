pub mod batch;
pub mod config;
pub mod process;
pub mod profit;

use std::path::Path;

use tracing::debug;

use licita_core::models::config::LicitaConfig;

/// Load the configuration named on the command line, else the user's
/// config file if one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LicitaConfig> {
    let default_path = config::default_config_path();

    let config = match config_path {
        Some(path) => LicitaConfig::from_file(Path::new(path))?,
        None if default_path.exists() => {
            debug!("Using config file {}", default_path.display());
            LicitaConfig::from_file(&default_path)?
        }
        None => LicitaConfig::default(),
    };

    config.validate()?;
    Ok(config)
}
