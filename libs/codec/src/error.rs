//! Protocol-level errors for the versioned type registry.
//!
//! Two failure classes exist and stay distinguishable: configuration errors
//! are fatal and surface at construction time (the registry is never
//! partially built), lookup errors are recoverable and surface at the
//! offending call. Nothing is deferred or silently defaulted.

use thiserror::Error;

use types::HeaderVersion;

/// Registry and header codec errors with diagnostic context.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    /// Version byte matches no recognized header layout.
    #[error("unsupported header version {version:#04x}: supported versions are {supported_versions}")]
    UnsupportedVersion {
        version: u8,
        supported_versions: String,
    },

    /// A second body factory was registered for an already-bound type code.
    #[error("duplicate body factory for type code {type_code}: each code binds exactly one factory")]
    DuplicateTypeCode { type_code: i16 },

    /// Two type codes would map to the same concrete body type, breaking
    /// the reverse (body to code) lookup.
    #[error("body type `{type_name}` is already registered under another type code")]
    DuplicateBodyType { type_name: &'static str },

    /// The decorator only composes with a base registry built for the
    /// Extended header layout.
    #[error("metadata decorator requires an Extended base registry, got version {version:#04x}")]
    VersionMismatch { version: u8 },

    /// Lookup for a type code nothing was registered under.
    #[error("no body factory registered for type code {type_code}")]
    UnknownTypeCode { type_code: i16 },

    /// Reverse lookup for a body whose concrete type is not registered.
    #[error("message body type `{type_name}` is not registered")]
    UnknownBodyType { type_name: &'static str },

    /// Buffer is too small to contain the expected header structure.
    #[error("header too small: need {need} bytes, got {got} (context: {context})")]
    MessageTooSmall {
        need: usize,
        got: usize,
        context: String,
    },

    /// Header signature byte validation failed.
    #[error("invalid header signature: expected {expected:#04x}, got {actual:#04x}")]
    InvalidSignature { expected: u8, actual: u8 },

    /// Extended-header metadata block is malformed.
    #[error("invalid header metadata at offset {offset}: {reason}")]
    InvalidMetadata { offset: usize, reason: String },

    /// Metadata does not fit the u16 length prefixes of the wire format.
    #[error("metadata too large for wire format: {context} length {len} exceeds {limit}")]
    MetadataTooLarge {
        context: String,
        len: usize,
        limit: usize,
    },
}

impl ProtocolError {
    /// Create an UnsupportedVersion error listing the recognized layouts.
    pub fn unsupported_version(version: u8) -> Self {
        Self::UnsupportedVersion {
            version,
            supported_versions: format!(
                "{:#04x} (basic), {:#04x} (extended)",
                HeaderVersion::Basic.as_byte(),
                HeaderVersion::Extended.as_byte()
            ),
        }
    }

    /// Create a MessageTooSmall error with parsing context.
    pub fn message_too_small(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::MessageTooSmall {
            need,
            got,
            context: context.into(),
        }
    }

    /// True for the recoverable lookup-miss class, false for configuration
    /// and wire-parse failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeCode { .. } | Self::UnknownBodyType { .. }
        )
    }
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
