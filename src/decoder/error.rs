//! Decoder-specific error types

use super::registry::ProtocolTag;
use serde::Serialize;

/// Result type for decoder operations
pub type DecoderResult<T> = Result<T, DecoderError>;

/// Errors that prevent any records from being produced for a transaction
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Transaction {txid} does not contain any OP_RETURN data")]
    NoDataCarrierOutput { txid: String },

    #[error("Script does not begin with OP_RETURN (0x6a)")]
    NotDataCarrier,

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Invalid transaction encoding: {0}")]
    InvalidTransaction(#[from] bitcoin::consensus::encode::Error),
}

/// Reasons the pushdata decoder stopped before the end of the script
///
/// Elements decoded before the halt are still returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PushdataError {
    #[error(
        "Malformed pushdata at offset {offset}: opcode 0x{opcode:02x} needs {needed} bytes but only {remaining} remain"
    )]
    MalformedPushdata {
        offset: usize,
        opcode: u8,
        needed: usize,
        remaining: usize,
    },

    #[error("Unsupported opcode 0x{opcode:02x} at offset {offset}")]
    UnsupportedOpcode { offset: usize, opcode: u8 },
}

/// A single record that could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordError {
    /// The fixed fields of a recognised protocol run past the end of the
    /// element sequence. `fields` holds whatever elements were available
    /// after the prefix, hex-encoded.
    #[error(
        "Truncated {protocol} record at element {index}: needs {required} fields, only {available} available"
    )]
    TruncatedProtocolRecord {
        protocol: ProtocolTag,
        index: usize,
        required: usize,
        available: usize,
        fields: Vec<String>,
    },
}

/// An element expected to hold UTF-8 text that does not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Element {index} is not valid UTF-8 (valid up to byte {valid_up_to}): 0x{hex}")]
pub struct NonTextElement {
    pub index: usize,
    pub hex: String,
    pub valid_up_to: usize,
}
