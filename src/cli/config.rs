//! Configuration file
//!
//! ```json
//! { "suffix_left": ".x", "suffix_right": ".y", "na_matches": "never",
//!   "log_level": "info", "max_print_rows": 10 }
//! ```
//!
//! All fields are optional. Command-line flags override these values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::join::{JoinOptions, NullMatching, DEFAULT_SUFFIX_LEFT, DEFAULT_SUFFIX_RIGHT};
use crate::observability::Severity;
use crate::table::DEFAULT_PRINT_ROWS;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Suffix for clashing `x` column names (default ".x")
    #[serde(default = "default_suffix_left")]
    pub suffix_left: String,

    /// Suffix for clashing `y` column names (default ".y")
    #[serde(default = "default_suffix_right")]
    pub suffix_right: String,

    /// Missing key matching: "never" or "na" (default "never")
    #[serde(default = "default_na_matches")]
    pub na_matches: String,

    /// Minimum log severity: "trace", "info", "warn" or "error"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Rows printed in table output (default 10)
    #[serde(default = "default_max_print_rows")]
    pub max_print_rows: usize,
}

fn default_suffix_left() -> String {
    DEFAULT_SUFFIX_LEFT.to_string()
}
fn default_suffix_right() -> String {
    DEFAULT_SUFFIX_RIGHT.to_string()
}
fn default_na_matches() -> String {
    "never".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_print_rows() -> usize {
    DEFAULT_PRINT_ROWS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix_left: default_suffix_left(),
            suffix_right: default_suffix_right(),
            na_matches: default_na_matches(),
            log_level: default_log_level(),
            max_print_rows: default_max_print_rows(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> CliResult<()> {
        self.join_options()?
            .validate()
            .map_err(|e| CliError::config_error(e.message().to_string()))?;

        self.severity()?;

        if self.max_print_rows == 0 {
            return Err(CliError::config_error("max_print_rows must be > 0"));
        }

        Ok(())
    }

    /// Join options implied by this configuration
    pub fn join_options(&self) -> CliResult<JoinOptions> {
        let na_matches: NullMatching = self
            .na_matches
            .parse()
            .map_err(|e: crate::join::JoinError| CliError::config_error(e.message().to_string()))?;

        Ok(JoinOptions::default()
            .with_suffix(self.suffix_left.as_str(), self.suffix_right.as_str())
            .with_na_matches(na_matches))
    }

    /// Minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }
}
