//! confgen: generate agent integration `conf.yaml` files from CSV.
//!
//! Each CSV data row becomes one entry under `instances`, with values
//! coerced to integers, floats, booleans or string lists where they look
//! like one. `init_config` is always emitted empty.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use confgen::{generate, GenerateOptions};
//!
//! let options = GenerateOptions::default();
//! let generated = generate(Path::new("instances.csv"), &options).unwrap();
//! println!("{} instance(s) written to {}", generated.document.instances().len(),
//!     generated.output_path.display());
//! ```

pub mod coerce;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod output;
pub mod reader;

use std::path::{Path, PathBuf};

use config::{Config, ConversionConfig, Overrides};
use document::ConfigDocument;
use error::Result;

/// Options for a generate invocation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Path to config file (defaults to `.confgen.toml` in the working directory).
    pub config_path: Option<PathBuf>,
    /// CLI overrides applied on top of the config file.
    pub overrides: Overrides,
}

/// Result of a complete run.
#[derive(Debug)]
pub struct Generated {
    pub document: ConfigDocument,
    pub output_path: PathBuf,
}

/// Read a CSV file and convert its rows into a configuration document.
pub fn convert(csv_path: &Path, conversion: &ConversionConfig) -> Result<ConfigDocument> {
    let rows = reader::read_rows(csv_path)?;
    tracing::debug!(
        list_columns = ?conversion.list_columns,
        "converting {} row(s)",
        rows.len()
    );
    Ok(ConfigDocument::from_rows(&rows, conversion))
}

/// Load the config file named by `options` and apply its overrides.
pub fn load_config(options: &GenerateOptions) -> Result<Config> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    let mut config = Config::load(&config_path)?;
    config.apply_overrides(options.overrides.clone());
    Ok(config)
}

/// Load config, convert the CSV and write the YAML output file.
pub fn generate(csv_path: &Path, options: &GenerateOptions) -> Result<Generated> {
    let config = load_config(options)?;
    let document = convert(csv_path, &config.conversion)?;
    output::write_document(&document, &config.output.path)?;

    Ok(Generated {
        document,
        output_path: config.output.path,
    })
}
