// irods-share-host/src/error.rs
use std::path::PathBuf;

use irods_share_common::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to load plugin library {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("plugin library {path} does not export plugin_factory: {source}")]
    MissingFactory {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("plugin_factory in {0} returned a null table")]
    NullTable(PathBuf),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
