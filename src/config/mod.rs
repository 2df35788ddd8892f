use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfGenError, Result};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".confgen.toml";

/// Default output file, written to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "conf.yaml";

/// Top-level configuration from `.confgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// How raw CSV values are turned into typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Columns whose values are split on commas into string lists.
    #[serde(default = "default_list_columns")]
    pub list_columns: BTreeSet<String>,
}

fn default_list_columns() -> BTreeSet<String> {
    BTreeSet::from(["tags".to_string()])
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            list_columns: default_list_columns(),
        }
    }
}

impl ConversionConfig {
    pub fn is_list_column(&self, column: &str) -> bool {
        self.list_columns.contains(column)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replacement list-column set. `Some(empty)` disables list expansion.
    pub list_columns: Option<BTreeSet<String>>,
    pub output_path: Option<PathBuf>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(columns) = overrides.list_columns {
            self.conversion.list_columns = columns;
        }
        if let Some(path) = overrides.output_path {
            self.output.path = path;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.output.path.as_os_str().is_empty() {
            return Err(ConfGenError::Config("output.path must not be empty".into()));
        }
        if self.conversion.list_columns.iter().any(|c| c.is_empty()) {
            return Err(ConfGenError::Config(
                "conversion.list_columns must not contain empty names".into(),
            ));
        }
        Ok(())
    }
}
