// irods-share-plugin/src/lib.rs
//! irodsShare microservice plugin.
//!
//! Built as a shared library, it exports the reserved `plugin_factory`
//! entry point and the `irods_irodsShare_read` microservice it registers.

mod ffi;
mod plugin;

pub use ffi::{irods_irodsShare_read, plugin_factory};
pub use plugin::{ShareRead, GREETING, OPERATION_NAME};

use irods_share_common::MsTableEntry;

/// The table `plugin_factory` hands to the host, still owned by the caller.
pub fn build_table() -> MsTableEntry {
    MsTableEntry::for_microservice(&ShareRead::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use irods_share_common::{Microservice, MsParam};

    #[test]
    fn table_matches_microservice_metadata() {
        let msvc = ShareRead::new();
        let table = build_table();

        assert_eq!(table.num_args(), msvc.num_args());
        assert_eq!(table.function_name(msvc.name()), Some(msvc.function_name()));
        assert_eq!(table.function_name(OPERATION_NAME), Some(OPERATION_NAME));
    }

    #[test]
    fn invoke_is_deterministic() {
        let msvc = ShareRead::new();
        for _ in 0..3 {
            let mut out = MsParam::empty();
            msvc.invoke(&mut out, None).unwrap();
            assert_eq!(out.str_value(), Some(GREETING));
        }
    }

    #[test]
    fn registers_under_its_own_symbol() {
        let msvc = ShareRead::new();
        assert_eq!(msvc.name(), "irods_irodsShare_read");
        assert_eq!(msvc.function_name(), msvc.name());
        assert_eq!(msvc.num_args(), 1);
    }
}
