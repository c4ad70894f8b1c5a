// irods-share-common/src/registry.rs

use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::context::RuleExecInfo;
use crate::microservice::MsFn;
use crate::ms_param::MsParam;
use crate::status::{check_status, Status};
use crate::table::MsTableEntry;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("operation '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error("operation '{operation}' names implementation '{function}', which could not be resolved")]
    SymbolNotFound { operation: String, function: String },

    #[error("operation '{0}' not found")]
    UnknownOperation(String),

    #[error("operation '{operation}' takes {expected} parameter(s), got {got}")]
    ArityMismatch {
        operation: String,
        expected: usize,
        got: usize,
    },

    #[error("operation '{operation}' declares {num_args} parameter(s); only one-parameter calls are supported")]
    UnsupportedArity { operation: String, num_args: usize },

    #[error("operation '{operation}' failed with status {status}")]
    Microservice { operation: String, status: Status },
}

/// Looks up microservice implementations by their exported name.
///
/// # Safety
/// Every pointer returned by `resolve` must really have the [`MsFn`]
/// signature and stay callable for as long as the registry holding it.
pub unsafe trait SymbolResolver {
    fn resolve(&self, function_name: &str) -> Option<MsFn>;
}

/// Resolver backed by a fixed name to function map, for statically linked plugins.
#[derive(Default)]
pub struct StaticResolver {
    functions: HashMap<String, MsFn>,
}

impl StaticResolver {
    pub fn new() -> Self {
        StaticResolver::default()
    }

    pub fn with(mut self, function_name: &str, func: MsFn) -> Self {
        self.functions.insert(function_name.to_string(), func);
        self
    }
}

// SAFETY: entries are typed MsFn pointers to functions with static lifetime.
unsafe impl SymbolResolver for StaticResolver {
    fn resolve(&self, function_name: &str) -> Option<MsFn> {
        self.functions.get(function_name).copied()
    }
}

/// One operation the host can dispatch to.
#[derive(Debug, Clone)]
pub struct RegisteredOperation {
    pub name: String,
    pub function_name: String,
    pub num_args: usize,
    func: MsFn,
}

/// Operations loaded from plugin tables, keyed by dispatch name.
#[derive(Debug, Default)]
pub struct MicroserviceRegistry {
    operations: HashMap<String, RegisteredOperation>,
}

impl MicroserviceRegistry {
    pub fn new() -> Self {
        MicroserviceRegistry::default()
    }

    /// Register every operation in `table`, resolving implementations through
    /// `resolver`. Either all of the table's operations are added or none are.
    pub fn register_table(
        &mut self,
        table: &MsTableEntry,
        resolver: &dyn SymbolResolver,
    ) -> Result<usize, RegistryError> {
        let mut pending = Vec::with_capacity(table.operation_count());

        for (name, function_name) in table.operations() {
            if self.operations.contains_key(name) {
                warn!("Refusing to re-register operation '{}'", name);
                return Err(RegistryError::AlreadyRegistered(name.to_string()));
            }
            let func = resolver
                .resolve(function_name)
                .ok_or_else(|| RegistryError::SymbolNotFound {
                    operation: name.to_string(),
                    function: function_name.to_string(),
                })?;
            pending.push(RegisteredOperation {
                name: name.to_string(),
                function_name: function_name.to_string(),
                num_args: table.num_args(),
                func,
            });
        }

        let added = pending.len();
        for op in pending {
            info!("Registered operation '{}' -> {}", op.name, op.function_name);
            self.operations.insert(op.name.clone(), op);
        }
        Ok(added)
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredOperation> {
        self.operations.get(name)
    }

    /// Registered dispatch names in sorted order.
    pub fn operation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Dispatch `name` with the given parameters and context handle.
    ///
    /// `context` is handed to the microservice as is; it must be null or a
    /// handle the caller keeps alive for the duration of the call.
    pub fn call(
        &self,
        name: &str,
        params: &mut [&mut MsParam],
        context: *mut RuleExecInfo,
    ) -> Result<(), RegistryError> {
        let op = self
            .get(name)
            .ok_or_else(|| RegistryError::UnknownOperation(name.to_string()))?;

        if params.len() != op.num_args {
            return Err(RegistryError::ArityMismatch {
                operation: name.to_string(),
                expected: op.num_args,
                got: params.len(),
            });
        }
        let output: &mut MsParam = match params {
            [output] => &mut **output,
            _ => {
                return Err(RegistryError::UnsupportedArity {
                    operation: name.to_string(),
                    num_args: op.num_args,
                })
            }
        };

        debug!("Calling operation '{}' via {}", op.name, op.function_name);
        // SAFETY: the resolver guaranteed `func` has the MsFn signature, and
        // `output` is a live exclusive borrow for the whole call.
        let status = unsafe { (op.func)(output as *mut MsParam, context) };

        check_status(status).map_err(|status| RegistryError::Microservice {
            operation: name.to_string(),
            status,
        })
    }
}
