//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RedirectorConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::RedirectTable;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Redirect table {path} is not a flat JSON object of strings: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// If `redirects.table_path` is set, the JSON table is read (relative to the
/// config file's directory) and inline `redirects.entries` are merged over it.
pub fn load_config(path: &Path) -> Result<RedirectorConfig, ConfigError> {
    let content = read(path)?;
    let mut config: RedirectorConfig = toml::from_str(&content)?;

    if let Some(table_path) = config.redirects.table_path.clone() {
        let table_path = match path.parent() {
            Some(dir) if table_path.is_relative() => dir.join(table_path),
            _ => table_path,
        };
        let mut table = load_table(&table_path)?;
        table.merge(std::mem::take(&mut config.redirects.entries));
        config.redirects.entries = table;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(
        path = %path.display(),
        locales = config.site.locales.len(),
        redirects = config.redirects.entries.len(),
        "Configuration file loaded"
    );

    Ok(config)
}

/// Read a redirect table from a flat JSON object.
pub fn load_table(path: &Path) -> Result<RedirectTable, ConfigError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Table {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
