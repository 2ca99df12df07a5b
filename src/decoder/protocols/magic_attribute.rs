//! Magic Attribute Protocol (MAP)
//!
//! `1PuQa7K62MiKCtssSLKy1kh56WWU7MtUR5 <action> [<key> <value>]...`

use super::{take_fixed, text_at};
use crate::decoder::cursor::ElementCursor;
use crate::decoder::error::RecordError;
use crate::decoder::registry::ProtocolTag;
use crate::types::bitcom::{KeyValue, MagicAttributeRecord, ProtocolRecord};
use tracing::warn;

pub fn decode(cursor: &mut ElementCursor<'_, '_>) -> Result<ProtocolRecord, RecordError> {
    let start = cursor.position();
    let fields = take_fixed(cursor, ProtocolTag::MagicAttribute)?;

    let mut pairs = Vec::new();
    let mut incomplete_tail = false;
    while let Some(key) = cursor.current() {
        if key.is_pipe() {
            break;
        }
        // A key must be followed by a value that is not a separator
        let value = match cursor.peek(1).filter(|value| !value.is_pipe()) {
            Some(value) => value,
            None => {
                warn!(
                    "MAP key at element {} has no value, ending pair list",
                    cursor.position()
                );
                incomplete_tail = true;
                break;
            }
        };
        let index = cursor.position();
        pairs.push(KeyValue {
            key: text_at(key, index),
            value: text_at(value, index + 1),
        });
        cursor.advance(2);
    }

    Ok(ProtocolRecord::MagicAttribute(MagicAttributeRecord {
        action: text_at(fields[0], start + 1),
        pairs,
        incomplete_tail,
    }))
}
