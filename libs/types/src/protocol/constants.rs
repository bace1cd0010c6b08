//! Protocol constants shared by every message on the wire.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// Leading byte of every protocol header. A stream that does not start
/// with this byte is not speaking this protocol.
pub const HEADER_SIGNATURE: u8 = 0xEF;

/// Recognized header layouts, identified by the version byte on the wire.
///
/// The version is negotiated once per registry instance; every header that
/// registry produces carries the same layout. Version bytes outside this
/// enum are rejected at configuration time, never at lookup time.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
pub enum HeaderVersion {
    /// Signature + version + type code only.
    Basic = 0x10,

    /// Basic fields plus a string key/value metadata map, refreshed
    /// per lookup by the metadata decorator.
    Extended = 0x20,
}

impl HeaderVersion {
    /// The byte written to the wire for this version.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}
