//! Bitcom OP_RETURN Decoder - Type System
//!
//! - `transaction`: Backend-neutral transaction view (RawTransaction, RawOutput)
//! - `bitcom`: Decoded protocol records (ProtocolRecord, DecodedRecord, etc.)

pub mod bitcom;
pub mod transaction;

pub use bitcom::{
    AuthorIdentityRecord, BFileRecord, DProtocolRecord, DecodedRecord, FieldIndex, KeyValue,
    MagicAttributeRecord, ProtocolRecord, TextField, UnknownField, UnknownRecord,
};
pub use transaction::{RawOutput, RawTransaction, VerboseTransaction};
