//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::query::Target;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database used by retention policy queries
    #[serde(default)]
    pub database: Option<String>,

    #[serde(default)]
    pub target: Target,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development
    #[default]
    Pretty,
    /// One JSON object per line for production
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("influx-explore").join("config.toml")),
            Some(PathBuf::from("/etc/influx-explore/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from the standard locations or environment
    pub fn discover() -> ConfigDiscovery {
        Self::discover_in(&Self::default_paths(), |key| std::env::var(key).ok())
    }

    /// Load the first existing file among `paths`, falling back to
    /// environment-only config. Never fails: every file or override that
    /// could not be used is recorded in [`ConfigDiscovery::failures`] so the
    /// caller can report it once logging is up.
    pub fn discover_in(
        paths: &[PathBuf],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigDiscovery {
        let mut failures = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            let loaded = Self::load(path).and_then(|mut config| {
                config.apply_overrides(&lookup)?;
                Ok(config)
            });
            match loaded {
                Ok(config) => {
                    return ConfigDiscovery {
                        config,
                        source: Some(path.clone()),
                        failures,
                    }
                }
                Err(e) => failures.push(e),
            }
        }

        let mut config = Config::default();
        if let Err(e) = config.apply_overrides(&lookup) {
            failures.push(e);
            config = Config::default();
        }

        ConfigDiscovery {
            config,
            source: None,
            failures,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(database) = lookup("INFLUX_EXPLORE_DATABASE") {
            self.database = Some(database);
        }

        // Target overrides
        if let Some(measurement) = lookup("INFLUX_EXPLORE_MEASUREMENT") {
            self.target.measurement = measurement;
        }
        if let Some(policy) = lookup("INFLUX_EXPLORE_POLICY") {
            self.target.policy = Some(policy);
        }

        // Logging overrides
        if let Some(level) = lookup("INFLUX_EXPLORE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("INFLUX_EXPLORE_LOG_FORMAT") {
            self.logging.format = format.parse().map_err(|_| ConfigError::InvalidValue {
                key: "INFLUX_EXPLORE_LOG_FORMAT".to_string(),
                value: format,
            })?;
        }

        Ok(())
    }
}

/// Outcome of searching the standard config locations
#[derive(Debug)]
pub struct ConfigDiscovery {
    /// The configuration in effect
    pub config: Config,
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
    /// Files or overrides that were found but could not be used
    pub failures: Vec<ConfigError>,
}

impl ConfigDiscovery {
    /// Log where the config came from and every failure on the way
    pub fn report(&self) {
        for failure in &self.failures {
            tracing::warn!("Skipped unusable config: {}", failure);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# influx-explore Configuration
#
# Environment variables override these settings:
# - INFLUX_EXPLORE_DATABASE
# - INFLUX_EXPLORE_MEASUREMENT
# - INFLUX_EXPLORE_POLICY
# - INFLUX_EXPLORE_LOG_LEVEL
# - INFLUX_EXPLORE_LOG_FORMAT

# Database used by SHOW RETENTION POLICIES
# database = "telegraf"

[target]
# Measurement name, or a /regex/; empty means all measurements
measurement = ""

# Retention policy; "default" leaves the measurement unqualified
policy = "default"

# Tag filters, rendered in order and joined with AND.
# Values written as /regex/ are matched with =~
# [[target.tags]]
# key = "host"
# value = "/server.*/"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
