// irods-share-host/src/harness.rs
use serde::Serialize;
use tracing::info;

use irods_share_common::{MicroserviceRegistry, MsParam, RegistryError, RuleExecInfo};

use crate::error::HostError;

/// Rule execution state the harness hands to microservices.
///
/// Plugins only ever see it as an opaque `RuleExecInfo` handle.
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub user_name: String,
    pub zone: String,
    pub session_id: u64,
    pub last_status: i32,
}

impl HostContext {
    pub fn new(user_name: &str, zone: &str) -> Self {
        HostContext {
            user_name: user_name.to_string(),
            zone: zone.to_string(),
            session_id: 0,
            last_status: 0,
        }
    }

    pub fn as_handle(&mut self) -> *mut RuleExecInfo {
        self as *mut HostContext as *mut RuleExecInfo
    }
}

impl Default for HostContext {
    fn default() -> Self {
        HostContext::new("rods", "tempZone")
    }
}

/// Result of dispatching one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallOutcome {
    pub operation: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub value: Option<String>,
}

/// Call `operation` with a fresh output parameter and return what it wrote.
pub fn call_operation(
    registry: &MicroserviceRegistry,
    operation: &str,
    context: &mut HostContext,
) -> Result<CallOutcome, HostError> {
    let mut output = MsParam::empty();
    let result = registry.call(operation, &mut [&mut output], context.as_handle());

    context.last_status = match &result {
        Ok(()) => 0,
        Err(RegistryError::Microservice { status, .. }) => *status,
        Err(_) => context.last_status,
    };
    result?;

    info!("Operation '{}' completed", operation);
    Ok(CallOutcome {
        operation: operation.to_string(),
        type_name: output.type_name().map(str::to_owned),
        value: output.str_value().map(str::to_owned),
    })
}
