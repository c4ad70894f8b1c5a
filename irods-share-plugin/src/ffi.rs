// irods-share-plugin/src/ffi.rs
//! C entry points exported from the shared library.

use std::os::raw::c_int;

use irods_share_common::{Microservice, MsError, MsParam, MsTableEntry, RuleExecInfo, SUCCESS};
use tracing::{debug, warn};

use crate::build_table;
use crate::plugin::ShareRead;

/// The read microservice as the host calls it.
///
/// # Safety
/// `out` must be null or point at a writable parameter owned by the caller.
/// `rei` is never dereferenced.
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn irods_irodsShare_read(out: *mut MsParam, rei: *mut RuleExecInfo) -> c_int {
    // SAFETY: caller guarantees `out` is null or valid and exclusively ours for the call.
    let Some(output) = (unsafe { out.as_mut() }) else {
        let err = MsError::NullParameter { position: 0 };
        warn!("irods_irodsShare_read: {}", err);
        return err.status();
    };
    // SAFETY: the context is only borrowed, never read.
    let context = unsafe { RuleExecInfo::from_ptr(rei) };

    match ShareRead.invoke(output, context) {
        Ok(()) => SUCCESS,
        Err(e) => {
            warn!("irods_irodsShare_read: {}", e);
            e.status()
        }
    }
}

/// Reserved entry point the host calls once per load.
///
/// Ownership of the returned table passes to the caller, which must hand it
/// to `MsTableEntry::from_raw` when unloading. Never returns null: a failed
/// allocation aborts the load.
///
/// Events logged here go to the shared library's own `tracing` dispatcher,
/// not the host's subscriber, so a dlopen-ing host does not see them.
#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub extern "C" fn plugin_factory() -> *mut MsTableEntry {
    let table = build_table();
    debug!(
        "irodsShare plugin loaded: {} operation(s), {} parameter(s)",
        table.operation_count(),
        table.num_args()
    );
    table.into_raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GREETING, OPERATION_NAME};
    use irods_share_common::status::SYS_INTERNAL_NULL_INPUT_ERR;
    use irods_share_common::STR_MS_T;
    use std::ptr;

    /// Stand-in for host rule state.
    #[repr(C)]
    #[derive(Debug, Clone, PartialEq)]
    struct FakeRuleState {
        user: [u8; 16],
        session: u64,
        last_status: i32,
    }

    impl FakeRuleState {
        fn new() -> Self {
            let mut user = [0u8; 16];
            user[..4].copy_from_slice(b"rods");
            FakeRuleState {
                user,
                session: 7,
                last_status: 0,
            }
        }

        fn as_handle(&mut self) -> *mut RuleExecInfo {
            self as *mut FakeRuleState as *mut RuleExecInfo
        }
    }

    #[test]
    fn writes_greeting_and_reports_success() {
        let mut out = MsParam::empty();
        let mut state = FakeRuleState::new();

        let status = unsafe { irods_irodsShare_read(&mut out, state.as_handle()) };

        assert_eq!(status, 0);
        assert_eq!(out.str_value(), Some(GREETING));
        assert_eq!(out.type_name(), Some(STR_MS_T));
    }

    #[test]
    fn result_does_not_depend_on_context() {
        let mut states = vec![FakeRuleState::new(), FakeRuleState::new()];
        states[1].user = *b"someone_else\0\0\0\0";
        states[1].session = u64::MAX;
        states[1].last_status = -1;

        let mut results = Vec::new();
        for state in states.iter_mut() {
            let mut out = MsParam::empty();
            let status = unsafe { irods_irodsShare_read(&mut out, state.as_handle()) };
            results.push((status, out.str_value().map(str::to_owned)));
        }

        let mut out = MsParam::empty();
        let status = unsafe { irods_irodsShare_read(&mut out, ptr::null_mut()) };
        results.push((status, out.str_value().map(str::to_owned)));

        assert!(results
            .iter()
            .all(|r| *r == (0, Some(GREETING.to_string()))));
    }

    #[test]
    fn context_is_left_untouched() {
        let mut state = FakeRuleState::new();
        let before = state.clone();

        let mut out = MsParam::empty();
        unsafe { irods_irodsShare_read(&mut out, state.as_handle()) };

        assert_eq!(state, before);
    }

    #[test]
    fn overwrites_previous_output() {
        let mut out = MsParam::empty();
        out.fill_str("stale value").unwrap();

        let status = unsafe { irods_irodsShare_read(&mut out, ptr::null_mut()) };

        assert_eq!(status, 0);
        assert_eq!(out.str_value(), Some(GREETING));
    }

    #[test]
    fn null_output_is_a_parameter_error() {
        let status = unsafe { irods_irodsShare_read(ptr::null_mut(), ptr::null_mut()) };
        assert_eq!(status, SYS_INTERNAL_NULL_INPUT_ERR);
    }

    #[test]
    fn factory_table_registers_the_read_operation() {
        let raw = plugin_factory();
        assert!(!raw.is_null());

        let table = unsafe { MsTableEntry::from_raw(raw) }.unwrap();
        assert_eq!(table.num_args(), 1);
        assert_eq!(table.operation_count(), 1);
        assert_eq!(
            table.operations().collect::<Vec<_>>(),
            vec![(OPERATION_NAME, OPERATION_NAME)]
        );
    }

    #[test]
    fn factory_tables_are_independent() {
        let first = unsafe { MsTableEntry::from_raw(plugin_factory()) }.unwrap();
        let mut second = unsafe { MsTableEntry::from_raw(plugin_factory()) }.unwrap();

        assert_eq!(first, second);
        assert!(!ptr::eq(&*first, &*second));

        second.add_operation("extra", "extra_impl");
        assert_eq!(first.operation_count(), 1);
        assert_eq!(second.operation_count(), 2);
    }
}
