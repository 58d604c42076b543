//! Configuration management for ledgerview
//!
//! This module handles loading, validation, and management of
//! ledgerview configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Where ledger exports are fetched from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Export locations, tried in order until one yields data
    #[serde(default = "default_candidates")]
    pub candidates: Vec<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
        }
    }
}

fn default_candidates() -> Vec<PathBuf> {
    vec![PathBuf::from("./data/ledger.csv")]
}

/// Local snapshot cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the cached snapshot
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
    /// Persist a snapshot after every successful sync
    #[serde(default = "default_true")]
    pub enable: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
            enable: true,
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/snapshot.json")
}

fn default_true() -> bool {
    true
}

/// How summary totals are scaled for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryUnit {
    /// Hundred-thousands, e.g. "1.5L"
    Lakh,
    /// Full amount with digit grouping
    Plain,
}

impl Default for SummaryUnit {
    fn default() -> Self {
        SummaryUnit::Lakh
    }
}

impl std::str::FromStr for SummaryUnit {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lakh" => Ok(SummaryUnit::Lakh),
            "plain" => Ok(SummaryUnit::Plain),
            _ => Err(format!("Invalid summary unit: {}", s)),
        }
    }
}

impl std::fmt::Display for SummaryUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryUnit::Lakh => write!(f, "lakh"),
            SummaryUnit::Plain => write!(f, "plain"),
        }
    }
}

/// Output formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Symbol printed before amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Scale used for the summary cards
    #[serde(default)]
    pub summary_unit: SummaryUnit,
    /// Limit the party list (0 shows every party)
    #[serde(default)]
    pub top_parties: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            summary_unit: SummaryUnit::Lakh,
            top_parties: 0,
        }
    }
}

fn default_currency_symbol() -> String {
    "\u{20b9}".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
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

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Export source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Snapshot cache settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        match Self::load(path.to_path_buf()) {
            Err(ConfigError::FileNotFound { .. }) => Ok(Config::default()),
            other => other,
        }
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.candidates.is_empty() {
            return Err(ConfigError::MissingField {
                field: "source.candidates".to_string(),
            });
        }

        if self.storage.enable && self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.path".to_string(),
                reason: "Snapshot path must not be empty when storage is enabled".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
