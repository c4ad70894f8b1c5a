// irods-share-common/src/microservice.rs
use std::os::raw::c_int;

use crate::context::RuleExecInfo;
use crate::error::MsError;
use crate::ms_param::MsParam;
use crate::table::MsTableEntry;

/// C signature of a one-parameter microservice as the host calls it.
pub type MsFn = unsafe extern "C" fn(*mut MsParam, *mut RuleExecInfo) -> c_int;

/// C signature of the plugin factory. The table itself is a Rust type, so
/// plugin and host must share a build of this crate.
pub type PluginFactoryFn = unsafe extern "C" fn() -> *mut MsTableEntry;

/// Reserved symbol the host looks up to load a plugin.
pub const PLUGIN_FACTORY_SYMBOL: &[u8] = b"plugin_factory\0";

/// Safe Rust face of a microservice taking one output parameter.
pub trait Microservice: Send + Sync {
    /// Dispatch key the host registers the operation under.
    fn name(&self) -> &str;

    /// Exported symbol implementing the operation. Defaults to the dispatch key.
    fn function_name(&self) -> &str {
        self.name()
    }

    /// User-supplied parameters, not counting the rule execution context.
    fn num_args(&self) -> usize {
        1
    }

    /// Run the operation, writing its result into `output`.
    fn invoke(&self, output: &mut MsParam, context: Option<&RuleExecInfo>) -> Result<(), MsError>;
}
