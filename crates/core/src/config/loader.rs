//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Standard locations searched when no explicit path is given
const CANDIDATES: [&str; 3] = [".dogfinder.toml", "dogfinder.toml", ".config/dogfinder.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path, a standard location, or defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in
    /// the standard locations silently falls back to the defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let schema = match config_path.as_deref() {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        tracing::debug!(path = ?config_path, "Configuration loaded");

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    CANDIDATES
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load, parse and validate a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("While reading config file {}", path))?;

    let schema: ConfigSchema = toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("While parsing config file {}", path))?;

    schema
        .validate()
        .context(format!("While validating config file {}", path))?;

    Ok(schema)
}
