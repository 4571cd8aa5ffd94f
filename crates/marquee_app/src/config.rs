//! Application configuration.
//!
//! Read from a RON file (`MARQUEE_CONFIG`, else `./marquee.ron`); a missing
//! file means defaults. `TMDB_API_KEY` and `MARQUEE_CATALOG_URL` override the
//! file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use marquee_engine::CatalogSettings;
use marquee_logging::{marquee_info, LogDestination};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "./marquee.ron";
pub const CONFIG_PATH_VAR: &str = "MARQUEE_CONFIG";
pub const API_KEY_VAR: &str = "TMDB_API_KEY";
pub const CATALOG_URL_VAR: &str = "MARQUEE_CATALOG_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let settings = CatalogSettings::default();
        Self {
            base_url: settings.base_url,
            api_key: settings.api_key,
            language: settings.language,
            connect_timeout_ms: millis(settings.connect_timeout),
            request_timeout_ms: millis(settings.request_timeout),
            max_bytes: settings.max_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub debounce_ms: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            debounce_ms: millis(marquee_core::DEFAULT_QUIET_PERIOD),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Loads the file named by the environment, then applies env overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::load(&path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        marquee_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(api_key) = non_empty(API_KEY_VAR) {
            self.catalog.api_key = Some(api_key);
        }
        if let Some(base_url) = non_empty(CATALOG_URL_VAR) {
            self.catalog.base_url = base_url;
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.catalog.base_url.clone(),
            api_key: self.catalog.api_key.clone(),
            language: self.catalog.language.clone(),
            connect_timeout: Duration::from_millis(self.catalog.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.catalog.request_timeout_ms),
            max_bytes: self.catalog.max_bytes,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
