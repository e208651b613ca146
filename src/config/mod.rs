//! Configuration module for swillan
//!
//! Manages application configuration: where courses come from (the local
//! catalog or a remote service) and how long a lookup may take.
//! Configuration is stored in the user's config directory.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the course repository lives
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Local sled catalog
    #[default]
    Catalog,
    /// Remote JSON service at `base_url`
    Http,
}

/// Default time a load may wait for its lookups
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

const fn default_timeout() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECS
}

/// Keys accepted by [`SwillanConfig::get`] and [`SwillanConfig::set`]
pub const KEYS: [&str; 5] = ["source", "base_url", "catalog_path", "lookup_timeout_secs", "quiet"];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SwillanConfig {
    /// Repository to browse
    #[serde(default)]
    pub source: Source,

    /// Base URL of the remote service (used when `source = "http"`)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory of the local catalog; defaults to the user data directory
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Seconds a load may wait for its lookups; 0 disables the limit
    #[serde(default = "default_timeout")]
    pub lookup_timeout_secs: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for SwillanConfig {
    fn default() -> Self {
        Self {
            source: Source::default(),
            base_url: None,
            catalog_path: None,
            lookup_timeout_secs: DEFAULT_LOOKUP_TIMEOUT_SECS,
            quiet: false,
        }
    }
}

impl SwillanConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("swillan").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if config doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load()
        } else {
            first_time_setup()
        }
    }

    /// Default catalog location in the user data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the data directory cannot be determined.
    pub fn default_catalog_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("swillan").join("catalog"))
    }

    /// Catalog directory, falling back to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn catalog_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.catalog_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_catalog_path(),
        }
    }

    /// Lookup timeout, `None` when disabled
    #[must_use]
    pub const fn lookup_timeout(&self) -> Option<Duration> {
        if self.lookup_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.lookup_timeout_secs))
        }
    }

    /// Read a setting by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "source" => Some(
                match self.source {
                    Source::Catalog => "catalog",
                    Source::Http => "http",
                }
                .to_string(),
            ),
            "base_url" => Some(self.base_url.clone().unwrap_or_default()),
            "catalog_path" => Some(
                self.catalog_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "lookup_timeout_secs" => Some(self.lookup_timeout_secs.to_string()),
            "quiet" => Some(self.quiet.to_string()),
            _ => None,
        }
    }

    /// Change a setting by key (in memory; call `save` to persist)
    ///
    /// An empty value clears optional settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unknown key or a value that does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |expected: &str| {
            ConfigError::Message(format!("Invalid value '{value}' for {key}: expected {expected}"))
        };
        let value = value.trim();

        match key {
            "source" => {
                self.source = match value.to_lowercase().as_str() {
                    "catalog" => Source::Catalog,
                    "http" => Source::Http,
                    _ => return Err(invalid("'catalog' or 'http'")),
                };
            }
            "base_url" => {
                if value.is_empty() {
                    self.base_url = None;
                } else {
                    url::Url::parse(value).map_err(|_| invalid("an absolute URL"))?;
                    self.base_url = Some(value.to_string());
                }
            }
            "catalog_path" => {
                self.catalog_path = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "lookup_timeout_secs" => {
                self.lookup_timeout_secs =
                    value.parse().map_err(|_| invalid("a number of seconds"))?;
            }
            "quiet" => {
                self.quiet = value.parse().map_err(|_| invalid("true or false"))?;
            }
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown setting '{key}' (known: {})",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwillanConfig::default();
        assert_eq!(config.source, Source::Catalog);
        assert!(config.base_url.is_none());
        assert_eq!(config.lookup_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let config = SwillanConfig {
            lookup_timeout_secs: 0,
            ..SwillanConfig::default()
        };
        assert_eq!(config.lookup_timeout(), None);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = SwillanConfig::load_from(&path).unwrap();
        assert_eq!(config, SwillanConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = SwillanConfig::default();
        config.set("source", "http").unwrap();
        config.set("base_url", "https://courses.example.com/api").unwrap();
        config.set("lookup_timeout_secs", "3").unwrap();
        config.save_to(&path).unwrap();

        let loaded = SwillanConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let config = SwillanConfig::load_from(&path).unwrap();
        assert!(config.quiet);
        assert_eq!(config.lookup_timeout_secs, DEFAULT_LOOKUP_TIMEOUT_SECS);
    }

    #[test]
    fn test_get_every_key() {
        let config = SwillanConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = SwillanConfig::default();
        assert!(config.set("source", "ftp").is_err());
        assert!(config.set("base_url", "not a url").is_err());
        assert!(config.set("lookup_timeout_secs", "soon").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_set_empty_clears_optional() {
        let mut config = SwillanConfig::default();
        config.set("catalog_path", "/tmp/catalog").unwrap();
        assert_eq!(config.catalog_path().unwrap(), PathBuf::from("/tmp/catalog"));

        config.set("catalog_path", "").unwrap();
        assert!(config.catalog_path.is_none());
    }
}
