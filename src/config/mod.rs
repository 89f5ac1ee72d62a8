//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, and `HOTEL_SEARCH_*` environment variables (`__` separates
//! sections, e.g. `HOTEL_SEARCH_API__BASE_URL`).

mod file_config;

pub use file_config::{read_config_file, save_config_file, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sources::{SourceKind, OVERPASS_API_URL};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "HOTEL_SEARCH";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Overpass settings
    #[serde(default)]
    pub overpass: OverpassConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; `/api/search` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Overpass configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_endpoint")]
    pub endpoint: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: default_overpass_endpoint(),
        }
    }
}

fn default_overpass_endpoint() -> String {
    OVERPASS_API_URL.to_string()
}

/// Search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backend used when none is given on the command line
    #[serde(default)]
    pub default_source: SourceKind,

    /// Star filter applied when none is given ("all" or 1-5)
    #[serde(default = "default_stars")]
    pub default_stars: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_source: SourceKind::default(),
            default_stars: default_stars(),
        }
    }
}

fn default_stars() -> String {
    "all".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level for this crate's logs when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from defaults and environment variables only
pub fn get_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment())
        .build()?
        .try_deserialize()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Default location of the user configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hotel-search").join("config.toml"))
}

/// Find a configuration file in the default locations.
///
/// Checks the user config directory, then `./hotel-search.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    default_config_path()
        .into_iter()
        .chain(std::iter::once(PathBuf::from("hotel-search.toml")))
        .find(|path| path.is_file())
}
