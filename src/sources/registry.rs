//! Backend selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::sources::{ApiSource, HotelSource, OverpassSource, SourceError};
use crate::utils::{default_user_agent, HttpClient};

/// Which backend answers searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The hotel search HTTP API
    #[default]
    Api,
    /// OpenStreetMap Overpass, queried directly
    Overpass,
}

impl SourceKind {
    pub fn id(&self) -> &'static str {
        match self {
            SourceKind::Api => "api",
            SourceKind::Overpass => "overpass",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(SourceKind::Api),
            "overpass" | "osm" => Ok(SourceKind::Overpass),
            other => Err(SourceError::InvalidRequest(format!("Unknown source: {}", other))),
        }
    }
}

/// Construct the backend for `kind` from configuration
pub fn build_source(kind: SourceKind, config: &Config) -> Result<Arc<dyn HotelSource>, SourceError> {
    let user_agent = config
        .api
        .user_agent
        .as_deref()
        .unwrap_or(default_user_agent());
    let client = HttpClient::with_options(user_agent, Duration::from_secs(config.api.timeout_secs))?;

    let source: Arc<dyn HotelSource> = match kind {
        SourceKind::Api => Arc::new(ApiSource::new(client, &config.api.base_url)?),
        SourceKind::Overpass => Arc::new(OverpassSource::with_endpoint(
            client,
            config.overpass.endpoint.clone(),
        )),
    };

    tracing::debug!("Using source: {}", source.name());
    Ok(source)
}
