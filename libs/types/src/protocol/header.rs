//! Message Header Implementation
//!
//! The header precedes every serialized body on the wire. Its shape is
//! version-specific: a registry built for one version only ever produces
//! headers of that version's variant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::protocol::constants::{HeaderVersion, HEADER_SIGNATURE};

/// Protocol envelope preceding a serialized message body.
///
/// ```text
/// ┌──────────────────────────────┬─────────────────────┐
/// │ Header (version-specific)    │ Body (variable)     │
/// └──────────────────────────────┴─────────────────────┘
/// ```
///
/// The variant tag always matches the `HeaderVersion` the producing
/// registry was configured with. An `Extended` header built by the base
/// registry carries an empty metadata map; real metadata is injected per
/// lookup by the decorator in libs/codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Header {
    /// Signature + version + type code.
    Basic {
        signature: u8,
        version: u8,
        type_code: i16,
    },
    /// Basic fields plus per-call metadata. Map insertion order is
    /// irrelevant on the wire.
    Extended {
        signature: u8,
        version: u8,
        type_code: i16,
        metadata: HashMap<String, String>,
    },
}

impl Header {
    /// Build a Basic header stamped with the given type code.
    pub fn basic(type_code: i16) -> Self {
        Self::Basic {
            signature: HEADER_SIGNATURE,
            version: HeaderVersion::Basic.as_byte(),
            type_code,
        }
    }

    /// Build an Extended header stamped with the given type code and
    /// metadata map.
    pub fn extended(type_code: i16, metadata: HashMap<String, String>) -> Self {
        Self::Extended {
            signature: HEADER_SIGNATURE,
            version: HeaderVersion::Extended.as_byte(),
            type_code,
            metadata,
        }
    }

    pub fn signature(&self) -> u8 {
        match self {
            Self::Basic { signature, .. } | Self::Extended { signature, .. } => *signature,
        }
    }

    pub fn version(&self) -> u8 {
        match self {
            Self::Basic { version, .. } | Self::Extended { version, .. } => *version,
        }
    }

    pub fn type_code(&self) -> i16 {
        match self {
            Self::Basic { type_code, .. } | Self::Extended { type_code, .. } => *type_code,
        }
    }

    /// Metadata map of an Extended header, `None` for Basic.
    pub fn metadata(&self) -> Option<&HashMap<String, String>> {
        match self {
            Self::Basic { .. } => None,
            Self::Extended { metadata, .. } => Some(metadata),
        }
    }
}
