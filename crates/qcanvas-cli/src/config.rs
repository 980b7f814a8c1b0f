//! Configuration for the qcanvas CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QCANVAS_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (`--config`, or `~/.qcanvas/config.yaml` if present)
//! 3. Default values

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Hard ceiling on circuit width; a column operator for 16 wires is already
/// a 65536 × 65536 dense matrix.
pub const WIRE_CEILING: usize = 16;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulation limits
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Report rendering
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Widest circuit that will be simulated or created
    #[serde(default = "default_max_wires")]
    pub max_wires: usize,

    /// Number of columns reported by `run` when `--columns` is not given
    #[serde(default = "default_display_columns")]
    pub display_columns: usize,
}

/// Report rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default report format
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for probabilities and amplitudes
    #[serde(default = "default_precision")]
    pub precision: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// How `run` prints its report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Styled terminal table
    #[default]
    Table,
    /// JSON document on stdout
    Json,
}

// Default value functions
fn default_max_wires() -> usize {
    11
}

fn default_display_columns() -> usize {
    10
}

fn default_precision() -> usize {
    3
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_wires: default_max_wires(),
            display_columns: default_display_columns(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: Config = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration from an explicit file, the default file, the
    /// environment and built-in defaults.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match default_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(path)?,
                None => Config::default(),
            },
        };

        config = config.merge_env(|key| std::env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `QCANVAS_*` overrides read through `lookup`.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QCANVAS_MAX_WIRES") {
            self.simulation.max_wires = parse_env("QCANVAS_MAX_WIRES", &v)?;
        }
        if let Some(v) = lookup("QCANVAS_DISPLAY_COLUMNS") {
            self.simulation.display_columns = parse_env("QCANVAS_DISPLAY_COLUMNS", &v)?;
        }
        if let Some(v) = lookup("QCANVAS_OUTPUT_FORMAT") {
            self.output.format = OutputFormat::from_str(&v, true).map_err(|_| {
                ConfigError::ValidationError(format!("Unknown output format: {v}"))
            })?;
        }
        if let Some(v) = lookup("QCANVAS_LOG_LEVEL") {
            self.logging.level = v;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.max_wires == 0 || self.simulation.max_wires > WIRE_CEILING {
            return Err(ConfigError::ValidationError(format!(
                "max_wires must be between 1 and {WIRE_CEILING}, got {}",
                self.simulation.max_wires
            )));
        }

        if self.simulation.display_columns == 0 {
            return Err(ConfigError::ValidationError(
                "display_columns must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

/// `~/.qcanvas/config.yaml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qcanvas").join("config.yaml"))
}

fn parse_env(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key} must be a number, got {value:?}")))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
