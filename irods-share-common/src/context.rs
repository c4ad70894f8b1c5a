// irods-share-common/src/context.rs
use std::marker::{PhantomData, PhantomPinned};

/// The host's rule execution state.
///
/// Opaque on purpose: plugins receive it on every call but have no way to
/// build, read or move one. Hosts written in Rust pass their own state
/// through a cast pointer.
#[repr(C)]
pub struct RuleExecInfo {
    _opaque: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

impl RuleExecInfo {
    /// Borrow the context behind a raw handle, if there is one.
    ///
    /// # Safety
    /// `ptr` must be null or a handle the host keeps alive for `'a`.
    pub unsafe fn from_ptr<'a>(ptr: *const RuleExecInfo) -> Option<&'a RuleExecInfo> {
        unsafe { ptr.as_ref() }
    }
}

impl std::fmt::Debug for RuleExecInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RuleExecInfo({:p})", self)
    }
}
