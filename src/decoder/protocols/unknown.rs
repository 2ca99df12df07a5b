//! Fallback for unrecognised prefixes

use super::text_at;
use crate::decoder::cursor::ElementCursor;
use crate::decoder::pushdata::Element;
use crate::types::bitcom::{ProtocolRecord, UnknownField, UnknownRecord};

/// Report `prefix` (the element under the cursor), then every element up to
/// the next pipe or the end
pub fn decode(cursor: &mut ElementCursor<'_, '_>, prefix: Element<'_>) -> ProtocolRecord {
    let prefix = text_at(prefix, cursor.position());
    cursor.advance(1);

    let mut fields = Vec::new();
    while let Some(element) = cursor.current() {
        if element.is_pipe() {
            break;
        }
        fields.push(UnknownField::from_bytes(element.as_bytes()));
        cursor.advance(1);
    }

    ProtocolRecord::Unknown(UnknownRecord { prefix, fields })
}
