use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

mod loader;

/// Example configuration embedded at compile time.
///
/// Library users can access this to generate a starter config file.
pub const EXAMPLE_CONFIG: &str = include_str!("../../codecell.example.toml");

/// Default wall-clock budget for a submission, in seconds
pub const DEFAULT_TIME_LIMIT: f64 = 5.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Config for the code executor
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the interpreter binary (uses PATH if not specified).
    #[serde(default)]
    pub interpreter_path: Option<PathBuf>,

    /// Wall-clock time budget per submission, in seconds.
    ///
    /// Fixed per service instance; the HTTP surface does not accept a
    /// per-request override.
    #[serde(default = "default_time_limit")]
    pub time_limit: f64,
}

fn default_time_limit() -> f64 {
    DEFAULT_TIME_LIMIT
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the path to the interpreter binary
    pub fn interpreter_binary(&self) -> PathBuf {
        self.interpreter_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("python3"))
    }

    /// Get the wall-clock deadline as a duration
    pub fn deadline(&self) -> Duration {
        Duration::from_secs_f64(self.time_limit)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter_path: None,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}
