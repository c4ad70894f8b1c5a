// irods-share-common/src/error.rs
use thiserror::Error;

use crate::status::{
    Status, SYS_INTERNAL_NULL_INPUT_ERR, SYS_INVALID_INPUT_PARAM, SYS_MALLOC_ERR,
};

/// Failures a microservice can report back to the host.
///
/// Every variant maps onto one of the host's negative status codes via
/// [`MsError::status`]; the host never sees the Rust value itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MsError {
    /// A parameter handle supplied by the host was null.
    #[error("microservice parameter {position} is null")]
    NullParameter { position: usize },

    /// The C allocator refused to hand out memory for a parameter value.
    #[error("failed to allocate {what}")]
    Allocation { what: &'static str },

    /// A text value could not be stored as a C string.
    #[error("string value contains an interior NUL byte at offset {offset}")]
    InteriorNul { offset: usize },
}

impl MsError {
    /// Host status code reported for this error.
    pub fn status(&self) -> Status {
        match self {
            MsError::NullParameter { .. } => SYS_INTERNAL_NULL_INPUT_ERR,
            MsError::Allocation { .. } => SYS_MALLOC_ERR,
            MsError::InteriorNul { .. } => SYS_INVALID_INPUT_PARAM,
        }
    }
}
