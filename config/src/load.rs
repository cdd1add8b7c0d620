use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::partial::PartialConfig;
use crate::resolve::create_config;
use crate::schema::Configuration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read an overlay from `path`. `.json` files are parsed as JSON, anything
/// else as TOML. A missing file is `Ok(None)`.
pub fn load_partial(path: &Path) -> Result<Option<PartialConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let partial = if is_json {
        PartialConfig::from_json_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        PartialConfig::from_toml_str(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    };

    tracing::debug!(path = %path.display(), "loaded configuration overlay");
    Ok(Some(partial))
}

/// Load the overlay at `path` (if any) and resolve it against the defaults.
pub fn load_config(path: &Path) -> Result<Configuration, ConfigError> {
    let partial = load_partial(path)?.unwrap_or_default();
    Ok(create_config(&partial))
}
