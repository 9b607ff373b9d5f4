#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard configuration.
//!
//! Configuration is a TOML document with three tables: `[pipeline]`
//! (sources and filter), `[map]` (map defaults and color ramps) and
//! `[server]` (listen address and static files). A default document is
//! embedded in the binary; a file given on the command line replaces it,
//! with omitted keys taking their default values.

use std::path::{Path, PathBuf};

use crime_dash_dataset::PipelineConfig;
use crime_dash_geography_models::regions::is_known_region;
use crime_dash_render::map::MapSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The embedded default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has invalid values.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ServerSettings {
    pub bind_addr: String,
    pub port: u16,
    /// Directory of the frontend served at `/`.
    pub static_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: PathBuf::from("app"),
        }
    }
}

impl ServerSettings {
    /// Applies the `BIND_ADDR` and `PORT` environment variables, if set.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
            self.bind_addr = bind_addr;
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => log::warn!("Ignoring invalid PORT '{port}': {e}"),
            }
        }
        self
    }
}

/// Complete dashboard configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub pipeline: PipelineConfig,
    pub map: MapSettings,
    pub server: ServerSettings,
}

impl DashboardConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is malformed.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::de::from_str(content)?;
        config.warn_suspicious();
        Ok(config)
    }

    fn warn_suspicious(&self) {
        if !is_known_region(self.pipeline.region_code) {
            log::warn!(
                "Region code {} is not a known INSEE region, no rows will be kept",
                self.pipeline.region_code
            );
        }
        if self.pipeline.indicators.is_empty() {
            log::warn!("No indicators configured, the dataset will be empty");
        }
    }
}

/// Loads the configuration from `path`, or the embedded default.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let Some(path) = path else {
        log::debug!("Using embedded default configuration");
        return DashboardConfig::from_toml(DEFAULT_CONFIG);
    };

    log::info!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    DashboardConfig::from_toml(&content)
}
