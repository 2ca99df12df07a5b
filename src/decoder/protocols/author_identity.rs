//! Author Identity Protocol (AIP)
//!
//! `15PciHG22SNLQJXMoSUaWVi7WSqc7hCfva <algorithm> <address> <signature> [index...]`
//!
//! The optional field indexes run until the next pipe or the end of the
//! script. Their width is not fixed by AIP, so every element up to that
//! boundary is taken as one index.

use super::{take_fixed, text_at};
use crate::decoder::cursor::ElementCursor;
use crate::decoder::error::RecordError;
use crate::decoder::registry::ProtocolTag;
use crate::types::bitcom::{AuthorIdentityRecord, FieldIndex, ProtocolRecord};

pub fn decode(cursor: &mut ElementCursor<'_, '_>) -> Result<ProtocolRecord, RecordError> {
    let start = cursor.position();
    let fields = take_fixed(cursor, ProtocolTag::AuthorIdentity)?;

    let mut field_indexes = Vec::new();
    while let Some(element) = cursor.current() {
        if element.is_pipe() {
            break;
        }
        field_indexes.push(FieldIndex::from_bytes(element.as_bytes()));
        cursor.advance(1);
    }

    Ok(ProtocolRecord::AuthorIdentity(AuthorIdentityRecord {
        algorithm: text_at(fields[0], start + 1),
        address: text_at(fields[1], start + 2),
        signature: fields[2].to_hex(),
        field_indexes,
    }))
}
