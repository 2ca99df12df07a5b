//! D:// key/value pointer
//!
//! `19iG3WTYSsbyos3uJ733yK4zEioi1FesNU <key> <value> <type> <sequence>`

use super::{take_fixed, text_at};
use crate::decoder::cursor::ElementCursor;
use crate::decoder::error::RecordError;
use crate::decoder::registry::ProtocolTag;
use crate::types::bitcom::{DProtocolRecord, ProtocolRecord};

pub fn decode(cursor: &mut ElementCursor<'_, '_>) -> Result<ProtocolRecord, RecordError> {
    let start = cursor.position();
    let fields = take_fixed(cursor, ProtocolTag::DProtocol)?;

    Ok(ProtocolRecord::DProtocol(DProtocolRecord {
        key: text_at(fields[0], start + 1),
        value: text_at(fields[1], start + 2),
        value_type: text_at(fields[2], start + 3),
        sequence: text_at(fields[3], start + 4),
    }))
}
