//! Bitcom OP_RETURN decoder
//!
//! Pipeline, leaf first:
//! - [`locator`] finds the first output whose script starts with `OP_RETURN`
//! - [`pushdata`] splits that script into pushed elements
//! - [`registry`] maps prefix elements to protocols
//! - [`protocols`] walks the elements and builds one record per invocation
//! - [`report`] renders the result as text or JSON
//!
//! Nothing here performs I/O or keeps state between calls; transactions are
//! fetched by [`crate::rpc`].

pub mod cursor;
pub mod error;
pub mod locator;
pub mod protocols;
pub mod pushdata;
pub mod registry;
pub mod report;

pub use error::{DecoderError, DecoderResult, NonTextElement, PushdataError, RecordError};
pub use locator::{find_data_carrier_output, DataCarrierOutput};
pub use protocols::{interpret, RecordOutcome};
pub use pushdata::{decode_pushdata, DataCarrierScript, Element, ElementSequence, PushdataDecode};
pub use registry::ProtocolTag;

use crate::types::bitcom::DecodedRecord;
use crate::types::RawTransaction;
use tracing::{debug, info};

/// Records decoded from one OP_RETURN script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    /// Number of pushdata elements recovered
    pub element_count: usize,
    /// Why pushdata decoding stopped early, if it did
    pub halt: Option<PushdataError>,
    pub records: Vec<RecordOutcome>,
}

impl DecodedPayload {
    /// Successfully decoded records, in order
    pub fn records(&self) -> impl Iterator<Item = &DecodedRecord> {
        self.records.iter().filter_map(|outcome| outcome.as_ref().ok())
    }

    /// Records that failed, in order
    pub fn errors(&self) -> impl Iterator<Item = &RecordError> {
        self.records.iter().filter_map(|outcome| outcome.as_ref().err())
    }

    /// True when neither the script nor any record had a problem
    pub fn is_clean(&self) -> bool {
        self.halt.is_none() && self.errors().next().is_none()
    }
}

/// Decoded OP_RETURN data of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub txid: String,
    /// Index of the output the data was read from
    pub vout: u32,
    pub payload: DecodedPayload,
}

/// Decode and interpret one data-carrier script
pub fn decode_payload(script: &DataCarrierScript<'_>) -> DecodedPayload {
    let PushdataDecode { elements, halt } = decode_pushdata(script);
    let records = interpret(&elements);

    debug!(
        "{} elements produced {} records",
        elements.len(),
        records.len()
    );

    DecodedPayload {
        element_count: elements.len(),
        halt,
        records,
    }
}

/// Locate the OP_RETURN output of `tx` and decode its Bitcom records
pub fn decode_transaction_data(tx: &RawTransaction) -> DecoderResult<DecodedTransaction> {
    let output = find_data_carrier_output(tx).ok_or_else(|| DecoderError::NoDataCarrierOutput {
        txid: tx.txid.clone(),
    })?;

    let payload = decode_payload(&output.script);
    info!(
        "Decoded {} records from output {} of {}",
        payload.records.len(),
        output.vout,
        tx.txid
    );

    Ok(DecodedTransaction {
        txid: tx.txid.clone(),
        vout: output.vout,
        payload,
    })
}

/// Decode a hex-encoded OP_RETURN script
pub fn decode_script_hex(script_hex: &str) -> DecoderResult<DecodedPayload> {
    let bytes = hex::decode(script_hex.trim())?;
    let script = DataCarrierScript::new(&bytes).ok_or(DecoderError::NotDataCarrier)?;
    Ok(decode_payload(&script))
}
