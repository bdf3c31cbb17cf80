use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};

pub mod defaults;

use defaults::*;

/// Environment variable overriding the output path
pub const ENV_OUTPUT: &str = "EPG_SERIES_OUTPUT";
/// Environment variable overriding the HTTP connect timeout (seconds)
pub const ENV_CONNECT_TIMEOUT: &str = "EPG_SERIES_CONNECT_TIMEOUT";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "EPG_SERIES_LOG_LEVEL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connection timeout for URL sources; the transfer itself is unbounded
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    /// Spaces per nesting level when pretty-printing
    #[serde(default = "default_indent_width")]
    pub indent: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            indent: default_indent_width(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl OutputConfig {
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Config {
    /// Load configuration: defaults, then the optional TOML file, then environment
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_file(config_file: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(config_file).map_err(|e| {
            AppError::configuration(format!("{}: {e}", config_file.display()))
        })?;
        let config = toml::from_str(&contents).map_err(|e| {
            AppError::configuration(format!("{}: {e}", config_file.display()))
        })?;
        debug!("Configuration loaded from: {}", config_file.display());
        Ok(config)
    }

    /// Apply `EPG_SERIES_*` overrides using `lookup` to read variables
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output.path = output;
        }
        if let Some(timeout) = lookup(ENV_CONNECT_TIMEOUT) {
            match timeout.trim().parse() {
                Ok(secs) => self.fetch.connect_timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid {}='{}', using {}s",
                    ENV_CONNECT_TIMEOUT, timeout, self.fetch.connect_timeout_secs
                ),
            }
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
    }
}
