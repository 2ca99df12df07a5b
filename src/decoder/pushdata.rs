//! OP_RETURN pushdata element decoder
//!
//! Splits a data-carrier script into the byte strings pushed after the
//! `OP_RETURN` marker. Only the push opcodes are understood:
//!
//! | Opcode        | Length source                     |
//! |---------------|-----------------------------------|
//! | `0x01..=0x4b` | the opcode value itself           |
//! | `0x4c`        | next byte (OP_PUSHDATA1)          |
//! | `0x4d`        | next 2 bytes LE (OP_PUSHDATA2)    |
//! | `0x4e`        | next 4 bytes LE (OP_PUSHDATA4)    |
//!
//! Anything else ends decoding. A push that claims more bytes than remain
//! also ends decoding. In both cases the elements read so far are kept and the
//! reason is returned alongside them.

use super::cursor::ElementCursor;
use super::error::PushdataError;
use super::registry::prefixes;
use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, warn};

/// OP_RETURN data-carrier marker
pub const OP_RETURN: u8 = 0x6a;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;

/// Largest opcode that encodes its own push length
pub const MAX_DIRECT_PUSH: u8 = 0x4b;

/// A script whose first byte is the OP_RETURN marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCarrierScript<'a> {
    bytes: &'a [u8],
}

impl<'a> DataCarrierScript<'a> {
    /// Wrap `bytes` if they start with `OP_RETURN`
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        match bytes.first() {
            Some(&OP_RETURN) => Some(Self { bytes }),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Never true; the marker byte is always present
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One pushed byte string, borrowed from the script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a>(&'a [u8]);

impl<'a> Element<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this element is the `|` pipeline separator
    pub fn is_pipe(&self) -> bool {
        self.0 == prefixes::PIPE
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Ordered elements decoded from one script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSequence<'a> {
    elements: Vec<Element<'a>>,
}

impl<'a> ElementSequence<'a> {
    pub fn new(elements: Vec<Element<'a>>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Element<'a>> {
        self.elements.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Element<'a>> + '_ {
        self.elements.iter().copied()
    }

    /// Start a forward cursor at element 0
    pub fn cursor(&self) -> ElementCursor<'_, 'a> {
        ElementCursor::new(&self.elements)
    }
}

impl<'a> FromIterator<&'a [u8]> for ElementSequence<'a> {
    fn from_iter<I: IntoIterator<Item = &'a [u8]>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Element::new).collect())
    }
}

/// Output of [`decode_pushdata`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushdataDecode<'a> {
    pub elements: ElementSequence<'a>,
    /// Why decoding stopped early, if it did
    pub halt: Option<PushdataError>,
}

impl PushdataDecode<'_> {
    /// True when every byte after the marker was consumed by push opcodes
    pub fn is_complete(&self) -> bool {
        self.halt.is_none()
    }
}

/// Decode the pushdata elements that follow the OP_RETURN marker
pub fn decode_pushdata<'a>(script: &DataCarrierScript<'a>) -> PushdataDecode<'a> {
    let bytes = script.as_bytes();
    let mut elements = Vec::new();
    let mut pos = 1;

    let halt = loop {
        if pos >= bytes.len() {
            break None;
        }

        let offset = pos;
        let opcode = bytes[pos];
        pos += 1;

        let width = match opcode {
            0x01..=MAX_DIRECT_PUSH => 0,
            OP_PUSHDATA1 => 1,
            OP_PUSHDATA2 => 2,
            OP_PUSHDATA4 => 4,
            _ => {
                warn!("Unsupported opcode 0x{:02x} at offset {}", opcode, offset);
                break Some(PushdataError::UnsupportedOpcode { offset, opcode });
            }
        };

        let remaining = bytes.len() - pos;
        if remaining < width {
            warn!(
                "Length field of opcode 0x{:02x} at offset {} is truncated",
                opcode, offset
            );
            break Some(PushdataError::MalformedPushdata {
                offset,
                opcode,
                needed: width,
                remaining,
            });
        }

        let length = match width {
            0 => opcode as usize,
            1 => bytes[pos] as usize,
            2 => LittleEndian::read_u16(&bytes[pos..pos + 2]) as usize,
            _ => LittleEndian::read_u32(&bytes[pos..pos + 4]) as usize,
        };
        pos += width;

        let remaining = bytes.len() - pos;
        if remaining < length {
            warn!(
                "Push at offset {} declares {} bytes but only {} remain",
                offset, length, remaining
            );
            break Some(PushdataError::MalformedPushdata {
                offset,
                opcode,
                needed: length,
                remaining,
            });
        }

        elements.push(Element::new(&bytes[pos..pos + length]));
        pos += length;
    };

    debug!(
        "Decoded {} pushdata elements from {}-byte script",
        elements.len(),
        bytes.len()
    );

    PushdataDecode {
        elements: ElementSequence::new(elements),
        halt,
    }
}

/// Encode `data` as a single push using the smallest opcode that fits
///
/// Empty data has no push form in this grammar (it would be `OP_0`), so it is
/// written as `OP_PUSHDATA1 0x00`.
pub fn encode_push(script: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    if (1..=MAX_DIRECT_PUSH as usize).contains(&len) {
        script.push(len as u8);
    } else if len <= u8::MAX as usize {
        script.push(OP_PUSHDATA1);
        script.push(len as u8);
    } else if len <= u16::MAX as usize {
        script.push(OP_PUSHDATA2);
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, len as u16);
        script.extend_from_slice(&buf);
    } else {
        script.push(OP_PUSHDATA4);
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, len as u32);
        script.extend_from_slice(&buf);
    }
    script.extend_from_slice(data);
}

/// Build an OP_RETURN script pushing each element in order
pub fn build_data_carrier_script<T: AsRef<[u8]>>(elements: &[T]) -> Vec<u8> {
    let mut script = vec![OP_RETURN];
    for element in elements {
        encode_push(&mut script, element.as_ref());
    }
    script
}
