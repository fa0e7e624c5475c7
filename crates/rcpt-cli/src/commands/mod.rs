pub mod batch;
pub mod compare;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use rcpt_core::RcptConfig;
use tracing::debug;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}
