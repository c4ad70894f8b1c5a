// irods-share-host/src/lib.rs
//! Minimal stand-in for the rule engine host: loads a microservice plugin,
//! registers its table and dispatches operations by name.

pub mod config;
pub mod error;
pub mod harness;
pub mod library;

pub use config::{load_config, ConfigSource, HostConfig, DEFAULT_CONFIG_PATH};
pub use error::HostError;
pub use harness::{call_operation, CallOutcome, HostContext};
pub use library::{PluginLibrary, TableSummary};
