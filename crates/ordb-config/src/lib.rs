use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use self::display::DisplayConfig;
pub use self::pager::PagerConfig;
pub use self::search::SearchConfig;

pub mod display;
pub mod pager;
pub mod search;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

fn default_database_path() -> PathBuf {
    data_dir().join("articles.db")
}

/// `~/.ordb`, or `.ordb` relative to the working directory without a home
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".ordb"))
        .unwrap_or_else(|| PathBuf::from(".ordb"))
}

/// Default location of the user config file
pub fn default_config_path() -> PathBuf {
    data_dir().join("config.json")
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub pager: PagerConfig,
    pub display: DisplayConfig,

    /// SQLite dictionary file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            pager: PagerConfig::default(),
            display: DisplayConfig::default(),
            database_path: default_database_path(),
        }
    }
}

impl Config {
    /// Load from an explicit file, or the default location when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!("No config at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `ORDB_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup("ORDB_DB") {
            self.database_path = PathBuf::from(db);
        }

        if let Some(value) = lookup("ORDB_CHARACTER_REPLACEMENT") {
            self.search.character_replacement = parse_bool("ORDB_CHARACTER_REPLACEMENT", &value)?;
        }

        if let Some(value) = lookup("ORDB_PAGINATION") {
            self.pager.enabled = parse_bool("ORDB_PAGINATION", &value)?;
        }

        if let Some(value) = lookup("ORDB_PAGE_SIZE") {
            self.pager.page_size = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "ORDB_PAGE_SIZE",
                value: value.clone(),
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.search.fuzzy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "search.fuzzy_threshold",
                value: threshold.to_string(),
            });
        }
        Ok(())
    }

    /// Result limit for a run, given whether output will be paged
    pub fn result_limit(&self, paginated: bool) -> usize {
        if paginated {
            self.search.limit_with_pagination
        } else {
            self.search.default_limit
        }
    }
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}
