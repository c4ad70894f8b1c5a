// irods-share-common/src/table.rs
//! Registration table handed from a plugin to the host.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::microservice::Microservice;

/// Operations a plugin registers, plus the number of user parameters each
/// of them takes. The implicit rule execution context is never counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MsTableEntry {
    num_args: usize,
    operations: BTreeMap<String, String>,
}

impl MsTableEntry {
    pub fn new(num_args: usize) -> Self {
        MsTableEntry {
            num_args,
            operations: BTreeMap::new(),
        }
    }

    /// Table declaring a single microservice under its own name.
    pub fn for_microservice(msvc: &dyn Microservice) -> Self {
        let mut table = MsTableEntry::new(msvc.num_args());
        table.add_operation(msvc.name(), msvc.function_name());
        table
    }

    /// Bind dispatch key `name` to the implementation called `function_name`.
    ///
    /// Returns the previous implementation name if `name` was already bound.
    pub fn add_operation(
        &mut self,
        name: impl Into<String>,
        function_name: impl Into<String>,
    ) -> Option<String> {
        self.operations.insert(name.into(), function_name.into())
    }

    pub fn num_args(&self) -> usize {
        self.num_args
    }

    /// `(dispatch key, implementation name)` pairs, ordered by key.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.operations
            .iter()
            .map(|(name, func)| (name.as_str(), func.as_str()))
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn function_name(&self, name: &str) -> Option<&str> {
        self.operations.get(name).map(String::as_str)
    }

    /// Give up ownership of the table. Whoever receives the pointer is
    /// responsible for passing it back to [`MsTableEntry::from_raw`] exactly once.
    pub fn into_raw(self) -> *mut MsTableEntry {
        Box::into_raw(Box::new(self))
    }

    /// Reclaim a table released by [`MsTableEntry::into_raw`].
    ///
    /// # Safety
    /// `ptr` must be null or come from `into_raw` in a build sharing this
    /// crate's layout, and must not be reclaimed twice.
    pub unsafe fn from_raw(ptr: *mut MsTableEntry) -> Option<Box<MsTableEntry>> {
        if ptr.is_null() {
            None
        } else {
            Some(unsafe { Box::from_raw(ptr) })
        }
    }
}
