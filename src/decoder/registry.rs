//! Bitcom protocol prefix registry
//!
//! Bitcom protocols are selected by a well-known prefix (a Bitcoin address
//! string) pushed as the first element of an invocation. Lookup is exact byte
//! equality with no normalisation.

use serde::Serialize;

/// Bitcom prefix constants
pub mod prefixes {
    /// B:// file attachment (https://github.com/unwriter/B)
    pub const B_FILE: &[u8] = b"19HxigV4QyBv3tHpQVcUEQyq1pzZVdoAut";

    /// Author Identity Protocol (https://github.com/BitcoinFiles/AUTHOR_IDENTITY_PROTOCOL)
    pub const AUTHOR_IDENTITY: &[u8] = b"15PciHG22SNLQJXMoSUaWVi7WSqc7hCfva";

    /// Magic Attribute Protocol (https://github.com/rohenaz/MAP)
    pub const MAGIC_ATTRIBUTE: &[u8] = b"1PuQa7K62MiKCtssSLKy1kh56WWU7MtUR5";

    /// D:// key/value (https://github.com/bitcoineler/D)
    pub const D_PROTOCOL: &[u8] = b"19iG3WTYSsbyos3uJ733yK4zEioi1FesNU";

    /// Pipeline separator (https://github.com/unwriter/Bitcom/issues/2)
    pub const PIPE: &[u8] = b"|";
}

/// Protocol selected by an invocation prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolTag {
    BFile,
    AuthorIdentity,
    MagicAttribute,
    DProtocol,
    Pipe,
    Unknown,
}

impl ProtocolTag {
    /// Resolve a prefix element to its protocol
    pub fn from_prefix(prefix: &[u8]) -> Self {
        match prefix {
            prefixes::B_FILE => Self::BFile,
            prefixes::AUTHOR_IDENTITY => Self::AuthorIdentity,
            prefixes::MAGIC_ATTRIBUTE => Self::MagicAttribute,
            prefixes::D_PROTOCOL => Self::DProtocol,
            prefixes::PIPE => Self::Pipe,
            _ => Self::Unknown,
        }
    }

    /// The prefix that selects this protocol, if it has a fixed one
    pub fn prefix(&self) -> Option<&'static [u8]> {
        match self {
            Self::BFile => Some(prefixes::B_FILE),
            Self::AuthorIdentity => Some(prefixes::AUTHOR_IDENTITY),
            Self::MagicAttribute => Some(prefixes::MAGIC_ATTRIBUTE),
            Self::DProtocol => Some(prefixes::D_PROTOCOL),
            Self::Pipe => Some(prefixes::PIPE),
            Self::Unknown => None,
        }
    }

    /// Number of elements after the prefix that must be present
    pub fn fixed_fields(&self) -> usize {
        match self {
            Self::BFile => 2,
            Self::AuthorIdentity => 3,
            Self::MagicAttribute => 1,
            Self::DProtocol => 4,
            Self::Pipe | Self::Unknown => 0,
        }
    }

    /// Get the display name for this protocol
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BFile => "B://",
            Self::AuthorIdentity => "Author Identity",
            Self::MagicAttribute => "Magic Attribute",
            Self::DProtocol => "D://",
            Self::Pipe => "| (pipe)",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ProtocolTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
