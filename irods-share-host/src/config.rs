// irods-share-host/src/config.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HostError;

pub const DEFAULT_CONFIG_PATH: &str = "irods-share-host.json";
const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_OPERATION: &str = "irods_irodsShare_read";

/// Harness settings, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Shared library to load. A bare file name is searched on the
    /// platform's library path.
    pub plugin_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Operation `call` dispatches when none is named.
    pub default_operation: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            plugin_path: PathBuf::from(libloading::library_filename("irods_share_plugin")),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            default_operation: DEFAULT_OPERATION.to_string(),
        }
    }
}

/// Where a loaded [`HostConfig`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { missing: PathBuf },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded from {}", path.display()),
            ConfigSource::Defaults { missing } => {
                write!(f, "defaults (no file at {})", missing.display())
            }
        }
    }
}

/// Load the config at `path`, falling back to defaults when the file is absent.
///
/// Runs before logging is set up, so it reports the source instead of logging it.
pub fn load_config(path: &Path) -> Result<(HostConfig, ConfigSource), HostError> {
    if !path.exists() {
        return Ok((
            HostConfig::default(),
            ConfigSource::Defaults {
                missing: path.to_path_buf(),
            },
        ));
    }

    let data = fs::read_to_string(path).map_err(|source| HostError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&data).map_err(|source| HostError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}
