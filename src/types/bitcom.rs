//! Bitcom protocol record types
//!
//! One [`ProtocolRecord`] variant per recognised protocol. Fields that the
//! protocols define as text are held as [`TextField`] so that a non-UTF-8
//! element is reported in place instead of failing the whole record.

use crate::decoder::error::NonTextElement;
use crate::decoder::registry::ProtocolTag;
use serde::Serialize;
use std::fmt;

/// A protocol field expected to be UTF-8 text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    NonText(NonTextElement),
}

impl TextField {
    /// Decode element `index` as UTF-8, keeping the raw bytes on failure
    pub fn decode(bytes: &[u8], index: usize) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Text(text.to_string()),
            Err(e) => {
                tracing::debug!("Element {} is not UTF-8: {}", index, e);
                Self::NonText(NonTextElement {
                    index,
                    hex: hex::encode(bytes),
                    valid_up_to: e.valid_up_to(),
                })
            }
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NonText(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::NonText(e) => write!(f, "<non-UTF-8 0x{}>", e.hex),
        }
    }
}

/// B:// file attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BFileRecord {
    pub data_length: usize,
    pub media_type: TextField,
    pub encoding: Option<TextField>,
    pub filename: Option<TextField>,
}

/// Author Identity signing metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorIdentityRecord {
    pub algorithm: TextField,
    pub address: TextField,
    /// Signature bytes, hex-encoded
    pub signature: String,
    pub field_indexes: Vec<FieldIndex>,
}

/// AIP field index, read as a little-endian unsigned integer
///
/// AIP does not fix the width or byte order of index values; the OP_RETURN
/// little-endian convention is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIndex {
    pub hex: String,
    /// `None` when the element is wider than 128 bits
    pub value: Option<u128>,
}

impl FieldIndex {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let value = (bytes.len() <= 16).then(|| {
            bytes
                .iter()
                .rev()
                .fold(0u128, |acc, &byte| (acc << 8) | byte as u128)
        });
        Self {
            hex: hex::encode(bytes),
            value,
        }
    }
}

/// Magic Attribute key/value metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagicAttributeRecord {
    pub action: TextField,
    pub pairs: Vec<KeyValue>,
    /// A key without a value ended the pair list. The key itself is left
    /// unconsumed.
    pub incomplete_tail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: TextField,
    pub value: TextField,
}

/// D:// key/value pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DProtocolRecord {
    pub key: TextField,
    pub value: TextField,
    #[serde(rename = "type")]
    pub value_type: TextField,
    pub sequence: TextField,
}

/// Unrecognised prefix and the elements that followed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownRecord {
    pub prefix: TextField,
    pub fields: Vec<UnknownField>,
}

/// Raw element of an unknown protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownField {
    pub hex: String,
    /// The element as text, when it is valid UTF-8
    pub text: Option<String>,
}

impl UnknownField {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            hex: hex::encode(bytes),
            text: std::str::from_utf8(bytes).ok().map(str::to_string),
        }
    }
}

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{:?}", text),
            None => write!(f, "0x{}", self.hex),
        }
    }
}

/// One decoded protocol invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum ProtocolRecord {
    BFile(BFileRecord),
    AuthorIdentity(AuthorIdentityRecord),
    MagicAttribute(MagicAttributeRecord),
    DProtocol(DProtocolRecord),
    Pipe,
    Unknown(UnknownRecord),
}

impl ProtocolRecord {
    pub fn tag(&self) -> ProtocolTag {
        match self {
            Self::BFile(_) => ProtocolTag::BFile,
            Self::AuthorIdentity(_) => ProtocolTag::AuthorIdentity,
            Self::MagicAttribute(_) => ProtocolTag::MagicAttribute,
            Self::DProtocol(_) => ProtocolTag::DProtocol,
            Self::Pipe => ProtocolTag::Pipe,
            Self::Unknown(_) => ProtocolTag::Unknown,
        }
    }
}

/// A record together with the element span it was decoded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    /// Index of the prefix element
    pub start: usize,
    /// Cursor position after the record
    pub end: usize,
    #[serde(flatten)]
    pub record: ProtocolRecord,
}

impl DecodedRecord {
    pub fn tag(&self) -> ProtocolTag {
        self.record.tag()
    }

    /// Number of elements consumed, prefix included
    pub fn consumed(&self) -> usize {
        self.end - self.start
    }
}
