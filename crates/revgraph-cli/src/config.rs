//! Config file discovery and loading.
//!
//! Lookup order: `--config <path>`, then `$XDG_CONFIG_HOME/revgraph/config.json`,
//! then the platform config directory. A missing default file means
//! defaults; a missing explicit file is an error.

use revgraph_graph::GraphConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const CONFIG_DIR: &str = "revgraph";
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Default config location, if a config directory can be found.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Loads the engine configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<GraphConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => load_from(&path),
        _ => {
            debug!("No config file found, using defaults");
            Ok(GraphConfig::default())
        }
    }
}

/// Reads and parses one config file.
pub fn load_from(path: &Path) -> Result<GraphConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = GraphConfig::from_json(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}
