// irods-share-plugin/src/plugin.rs
use irods_share_common::{Microservice, MsError, MsParam, RuleExecInfo};
use tracing::debug;

/// Dispatch key and exported symbol of the read microservice.
pub const OPERATION_NAME: &str = "irods_irodsShare_read";

/// Text written by every successful call.
pub const GREETING: &str = "Hello World!";

/// Read-time microservice. Writes [`GREETING`] into its output parameter and
/// never looks at the rule execution context.
///
/// The name suggests policy enforcement on reads; no policy is evaluated.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShareRead;

impl ShareRead {
    pub fn new() -> Self {
        ShareRead
    }
}

impl Microservice for ShareRead {
    fn name(&self) -> &str {
        OPERATION_NAME
    }

    fn num_args(&self) -> usize {
        1
    }

    fn invoke(&self, output: &mut MsParam, _context: Option<&RuleExecInfo>) -> Result<(), MsError> {
        debug!("{} writing fixed greeting", OPERATION_NAME);
        output.fill_str(GREETING)
    }
}
