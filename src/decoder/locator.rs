//! Data-carrier output locator

use super::pushdata::DataCarrierScript;
use crate::types::RawTransaction;
use tracing::debug;

/// The first OP_RETURN output of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCarrierOutput<'a> {
    pub vout: u32,
    pub script: DataCarrierScript<'a>,
}

/// Find the first output whose script starts with the OP_RETURN marker
///
/// Only the first script byte is inspected; an `0x6a` later in a script does
/// not qualify it.
pub fn find_data_carrier_output(tx: &RawTransaction) -> Option<DataCarrierOutput<'_>> {
    let found = tx.outputs.iter().find_map(|output| {
        DataCarrierScript::new(&output.script_pubkey).map(|script| DataCarrierOutput {
            vout: output.vout,
            script,
        })
    });

    match &found {
        Some(output) => debug!(
            "Transaction {} carries OP_RETURN data in output {}",
            tx.txid, output.vout
        ),
        None => debug!(
            "Transaction {} has no OP_RETURN output among {} outputs",
            tx.txid,
            tx.outputs.len()
        ),
    }

    found
}
