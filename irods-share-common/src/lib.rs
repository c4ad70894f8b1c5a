// irods-share-common/src/lib.rs
//! Types shared between the irodsShare plugin and the hosts that load it:
//! the parameter and context handles of the microservice ABI, the
//! registration table a plugin factory returns, and a small registry for
//! dispatching registered operations by name.

pub mod context;
pub mod error;
pub mod microservice;
pub mod ms_param;
pub mod registry;
pub mod status;
pub mod table;

// Re-export for convenience
pub use context::RuleExecInfo;
pub use error::MsError;
pub use microservice::{Microservice, MsFn, PluginFactoryFn, PLUGIN_FACTORY_SYMBOL};
pub use ms_param::{BytesBuf, MsParam, STR_MS_T};
pub use registry::{
    MicroserviceRegistry, RegisteredOperation, RegistryError, StaticResolver, SymbolResolver,
};
pub use status::{check_status, Status, SUCCESS};
pub use table::MsTableEntry;
