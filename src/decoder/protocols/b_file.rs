//! B:// file attachment
//!
//! `19HxigV4QyBv3tHpQVcUEQyq1pzZVdoAut <data> <media type> [encoding] [filename]`

use super::{take_fixed, text_at};
use crate::decoder::cursor::ElementCursor;
use crate::decoder::error::RecordError;
use crate::decoder::registry::ProtocolTag;
use crate::types::bitcom::{BFileRecord, ProtocolRecord, TextField};

pub fn decode(cursor: &mut ElementCursor<'_, '_>) -> Result<ProtocolRecord, RecordError> {
    let start = cursor.position();
    let fields = take_fixed(cursor, ProtocolTag::BFile)?;

    let encoding = optional_text(cursor);
    let filename = encoding.as_ref().and_then(|_| optional_text(cursor));

    Ok(ProtocolRecord::BFile(BFileRecord {
        data_length: fields[0].len(),
        media_type: text_at(fields[1], start + 2),
        encoding,
        filename,
    }))
}

/// Consume the next element as text if one exists and is not a separator
fn optional_text(cursor: &mut ElementCursor<'_, '_>) -> Option<TextField> {
    let element = cursor.current().filter(|element| !element.is_pipe())?;
    let index = cursor.position();
    cursor.advance(1);
    Some(text_at(element, index))
}
