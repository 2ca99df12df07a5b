//! Bitcom protocol dispatcher
//!
//! Walks an [`ElementSequence`] with a single forward cursor. At each step the
//! element under the cursor is treated as a protocol prefix, looked up in the
//! registry, and handed to that protocol's decoder, which consumes its fields
//! and leaves the cursor on the next prefix (usually a `|` separator).
//!
//! Decoders never read past the end of the sequence. When a protocol's fixed
//! fields are missing the record fails with
//! [`RecordError::TruncatedProtocolRecord`]; the dispatcher then resumes at the
//! next pipe after the failing prefix, or stops if there is none. Records
//! decoded before the failure are always kept.

pub mod author_identity;
pub mod b_file;
pub mod d_protocol;
pub mod magic_attribute;
pub mod unknown;

use super::cursor::ElementCursor;
use super::error::RecordError;
use super::pushdata::{Element, ElementSequence};
use super::registry::ProtocolTag;
use crate::types::bitcom::{DecodedRecord, ProtocolRecord, TextField};
use tracing::{debug, warn};

/// Result for a single protocol invocation
pub type RecordOutcome = Result<DecodedRecord, RecordError>;

/// Interpret decoded elements as a sequence of Bitcom protocol records
///
/// Pure: the same input always yields the same output.
pub fn interpret(elements: &ElementSequence<'_>) -> Vec<RecordOutcome> {
    let mut cursor = elements.cursor();
    let mut outcomes = Vec::new();

    while let Some(prefix) = cursor.current() {
        let start = cursor.position();
        let tag = ProtocolTag::from_prefix(prefix.as_bytes());
        debug!("Element {}: {} prefix", start, tag);

        let result = match tag {
            ProtocolTag::BFile => b_file::decode(&mut cursor),
            ProtocolTag::AuthorIdentity => author_identity::decode(&mut cursor),
            ProtocolTag::MagicAttribute => magic_attribute::decode(&mut cursor),
            ProtocolTag::DProtocol => d_protocol::decode(&mut cursor),
            ProtocolTag::Pipe => {
                cursor.advance(1);
                Ok(ProtocolRecord::Pipe)
            }
            ProtocolTag::Unknown => Ok(unknown::decode(&mut cursor, prefix)),
        };

        match result {
            Ok(record) => {
                debug_assert!(cursor.position() > start);
                outcomes.push(Ok(DecodedRecord {
                    start,
                    end: cursor.position(),
                    record,
                }));
            }
            Err(e) => {
                warn!("{}", e);
                outcomes.push(Err(e));
                match cursor.find_pipe(start + 1) {
                    Some(pipe) => {
                        debug!("Resynchronising at pipe element {}", pipe);
                        cursor.seek(pipe);
                    }
                    None => cursor.finish(),
                }
            }
        }
    }

    outcomes
}

/// Take the prefix plus `tag`'s fixed fields, or fail without moving
///
/// Returns the fixed fields (prefix excluded).
pub(crate) fn take_fixed<'s, 'a>(
    cursor: &mut ElementCursor<'s, 'a>,
    tag: ProtocolTag,
) -> Result<&'s [Element<'a>], RecordError> {
    let required = tag.fixed_fields();
    match cursor.take(required + 1) {
        Some(window) => Ok(&window[1..]),
        None => {
            let available: Vec<String> = cursor
                .rest()
                .iter()
                .skip(1)
                .map(|element| element.to_hex())
                .collect();
            Err(RecordError::TruncatedProtocolRecord {
                protocol: tag,
                index: cursor.position(),
                required,
                available: available.len(),
                fields: available,
            })
        }
    }
}

/// Decode a fixed field as text, using its absolute element index
pub(crate) fn text_at(field: Element<'_>, index: usize) -> TextField {
    TextField::decode(field.as_bytes(), index)
}
