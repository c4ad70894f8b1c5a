// irods-share-common/src/status.rs
//! Host status codes.
//!
//! The host treats `0` as success and any negative value as an error code
//! from its shared error table. Only the codes this workspace produces are
//! listed here.

use std::os::raw::c_int;

/// Status code returned across the microservice ABI.
pub type Status = c_int;

pub const SUCCESS: Status = 0;

/// A required input handle was null.
pub const SYS_INTERNAL_NULL_INPUT_ERR: Status = -99000;

/// The C allocator failed.
pub const SYS_MALLOC_ERR: Status = -9000;

/// An input value could not be represented in the host's format.
pub const SYS_INVALID_INPUT_PARAM: Status = -130000;

/// Turn a raw status into a `Result`, keeping the code on failure.
pub fn check_status(status: Status) -> Result<(), Status> {
    if status >= SUCCESS {
        Ok(())
    } else {
        Err(status)
    }
}
