// irods-share-common/src/ms_param.rs
//! The host's microservice parameter container.
//!
//! `MsParam` mirrors the host's C layout. Every pointer field is either null
//! or owns a block from the C allocator, so the host can release values a
//! plugin writes with plain `free`.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

use tracing::debug;

use crate::error::MsError;

/// Type tag the host uses for string parameters.
pub const STR_MS_T: &str = "STR_PI";

/// Raw byte buffer attached to a parameter. Not touched by string values.
#[repr(C)]
#[derive(Debug)]
pub struct BytesBuf {
    pub len: c_int,
    pub buf: *mut c_void,
}

/// A single typed microservice parameter.
///
/// Instances handed over by the host are borrowed for the duration of a call.
/// Instances created in Rust (see [`MsParam::empty`]) release their C
/// allocations on drop.
#[repr(C)]
#[derive(Debug)]
pub struct MsParam {
    label: *mut c_char,
    type_name: *mut c_char,
    in_out_struct: *mut c_void,
    #[allow(dead_code)]
    inp_out_buf: *mut BytesBuf,
}

impl MsParam {
    /// A parameter with no label, no type and no value.
    pub fn empty() -> Self {
        MsParam {
            label: ptr::null_mut(),
            type_name: ptr::null_mut(),
            in_out_struct: ptr::null_mut(),
            inp_out_buf: ptr::null_mut(),
        }
    }

    /// Store `value` as a string parameter, replacing whatever was there.
    ///
    /// Both the payload and the type tag are copied with the C allocator
    /// before the old contents are released, so on error the parameter is
    /// left exactly as it was.
    pub fn fill_str(&mut self, value: &str) -> Result<(), MsError> {
        let payload = CString::new(value).map_err(|e| MsError::InteriorNul {
            offset: e.nul_position(),
        })?;
        let tag = CString::new(STR_MS_T).map_err(|e| MsError::InteriorNul {
            offset: e.nul_position(),
        })?;

        let new_payload = c_strdup(&payload, "string payload")?;
        let new_tag = match c_strdup(&tag, "type tag") {
            Ok(p) => p,
            Err(e) => {
                // SAFETY: new_payload came from strdup above and is not shared.
                unsafe { libc::free(new_payload as *mut c_void) };
                return Err(e);
            }
        };

        self.clear();
        self.in_out_struct = new_payload as *mut c_void;
        self.type_name = new_tag;
        debug!(len = value.len(), "filled string parameter");
        Ok(())
    }

    /// The parameter's type tag, if it has one.
    pub fn type_name(&self) -> Option<&str> {
        // SAFETY: type_name is null or a NUL-terminated C string.
        unsafe { c_str_ref(self.type_name) }.and_then(|s| s.to_str().ok())
    }

    /// The string value, if this is a string parameter holding valid UTF-8.
    pub fn str_value(&self) -> Option<&str> {
        if self.type_name() != Some(STR_MS_T) {
            return None;
        }
        // SAFETY: string parameters keep a NUL-terminated C string in in_out_struct.
        unsafe { c_str_ref(self.in_out_struct as *const c_char) }.and_then(|s| s.to_str().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.type_name.is_null() && self.in_out_struct.is_null()
    }

    /// Release the type tag and value. The label and byte buffer stay put.
    pub fn clear(&mut self) {
        // SAFETY: both fields are null or own C allocations; free(NULL) is a no-op.
        unsafe {
            libc::free(self.type_name as *mut c_void);
            libc::free(self.in_out_struct);
        }
        self.type_name = ptr::null_mut();
        self.in_out_struct = ptr::null_mut();
    }
}

impl Default for MsParam {
    fn default() -> Self {
        MsParam::empty()
    }
}

impl Drop for MsParam {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: label is null or owns a C allocation.
        unsafe { libc::free(self.label as *mut c_void) };
        self.label = ptr::null_mut();
    }
}

fn c_strdup(value: &CStr, what: &'static str) -> Result<*mut c_char, MsError> {
    // SAFETY: value is a valid NUL-terminated string for the duration of the call.
    let copy = unsafe { libc::strdup(value.as_ptr()) };
    if copy.is_null() {
        return Err(MsError::Allocation { what });
    }
    Ok(copy)
}

/// # Safety
/// `ptr` must be null or point at a NUL-terminated string that outlives `'a`.
unsafe fn c_str_ref<'a>(ptr: *const c_char) -> Option<&'a CStr> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) })
    }
}
