//! Configuration file support for hotel-search.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "https://hotels.example.com"
//! timeout_secs = 30
//! user_agent = "my-widget/1.0"
//!
//! [overpass]
//! endpoint = "https://overpass-api.de/api/interpreter"
//!
//! [search]
//! default_source = "api"
//! default_stars = "all"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::Path;

use super::Config;

/// Read a TOML configuration file without environment overrides
pub fn read_config_file(path: &Path) -> Result<Config, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
}

/// Write a configuration as TOML, creating parent directories
pub fn save_config_file(config: &Config, path: &Path) -> Result<(), ConfigFileError> {
    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
    }
    std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
