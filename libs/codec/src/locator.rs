//! Type registry core: the lookup contract and its immutable implementation.
//!
//! A `TypeRegistry` is built once by `TypeLocatorBuilder`, then shared
//! read-only across arbitrarily many concurrent callers. No lookup mutates
//! registry state, so no locking is involved; body factories and header
//! factories must themselves be safe under concurrent invocation.

use std::any::TypeId;
use std::collections::HashMap;

use types::{Header, HeaderVersion, MessageBody};

use crate::error::{ProtocolError, ProtocolResult};

/// Produces a fresh, empty message-body instance for one type code.
///
/// Blanket-implemented for closures so registrations can pass plain
/// function values.
pub trait BodyFactory: Send + Sync {
    fn produce(&self) -> Box<dyn MessageBody>;
}

impl<F> BodyFactory for F
where
    F: Fn() -> Box<dyn MessageBody> + Send + Sync,
{
    fn produce(&self) -> Box<dyn MessageBody> {
        self()
    }
}

/// Produces a header stamped with a type code, consistent with one
/// protocol version.
pub trait HeaderFactory: Send + Sync {
    fn new_header(&self, type_code: i16) -> Header;
}

/// Stock header factory: layout selected by the negotiated version.
///
/// Extended headers leave this factory with an empty metadata map; the
/// decorator replaces the map per lookup.
pub(crate) struct VersionedHeaderFactory {
    version: HeaderVersion,
}

impl VersionedHeaderFactory {
    pub(crate) fn new(version: HeaderVersion) -> Self {
        Self { version }
    }
}

impl HeaderFactory for VersionedHeaderFactory {
    fn new_header(&self, type_code: i16) -> Header {
        match self.version {
            HeaderVersion::Basic => Header::basic(type_code),
            HeaderVersion::Extended => Header::extended(type_code, HashMap::new()),
        }
    }
}

/// Lookup contract shared by the registry and its decorators.
///
/// All operations are synchronous, bounded, and side-effect-free on the
/// locator's own state.
pub trait TypeLocator: Send + Sync {
    /// Produce a fresh body instance for the code. Never caches or shares
    /// instances across calls.
    fn body_lookup(&self, type_code: i16) -> ProtocolResult<Box<dyn MessageBody>>;

    /// Produce a header stamped with the code.
    fn header_lookup(&self, type_code: i16) -> ProtocolResult<Header>;

    /// Resolve the body's concrete type back to its code, then produce a
    /// header for it.
    fn header_lookup_for_body(&self, body: &dyn MessageBody) -> ProtocolResult<Header>;

    /// Pure membership check by code. Never fails.
    fn is_supported(&self, type_code: i16) -> bool;

    /// Pure membership check by concrete body type. Never fails.
    fn is_supported_body_type(&self, body_type: TypeId) -> bool;
}

/// Immutable mapping from wire type codes to body factories, bound to a
/// header factory for one protocol version.
///
/// Forward (code to factory) and reverse (body type to code) maps are
/// populated from the same registrations, so every code reachable through
/// one lookup is reachable through the other.
pub struct TypeRegistry {
    version: HeaderVersion,
    header_factory: Box<dyn HeaderFactory>,
    factories: HashMap<i16, Box<dyn BodyFactory>>,
    codes_by_body: HashMap<TypeId, i16>,
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("version", &self.version)
            .field("codes", &self.factories.len())
            .finish()
    }
}

impl TypeRegistry {
    pub(crate) fn new(
        version: HeaderVersion,
        header_factory: Box<dyn HeaderFactory>,
        factories: HashMap<i16, Box<dyn BodyFactory>>,
        codes_by_body: HashMap<TypeId, i16>,
    ) -> Self {
        Self {
            version,
            header_factory,
            factories,
            codes_by_body,
        }
    }

    /// The header layout this registry was built for.
    pub fn version(&self) -> HeaderVersion {
        self.version
    }

    /// Number of registered type codes.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// An empty registry is legal: valid, just answering NotFound to every
    /// lookup.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl TypeLocator for TypeRegistry {
    fn body_lookup(&self, type_code: i16) -> ProtocolResult<Box<dyn MessageBody>> {
        self.factories
            .get(&type_code)
            .map(|factory| factory.produce())
            .ok_or(ProtocolError::UnknownTypeCode { type_code })
    }

    fn header_lookup(&self, type_code: i16) -> ProtocolResult<Header> {
        if !self.factories.contains_key(&type_code) {
            return Err(ProtocolError::UnknownTypeCode { type_code });
        }
        Ok(self.header_factory.new_header(type_code))
    }

    fn header_lookup_for_body(&self, body: &dyn MessageBody) -> ProtocolResult<Header> {
        let type_code = self
            .codes_by_body
            .get(&body.as_any().type_id())
            .copied()
            .ok_or(ProtocolError::UnknownBodyType {
                type_name: body.message_name(),
            })?;
        self.header_lookup(type_code)
    }

    fn is_supported(&self, type_code: i16) -> bool {
        self.factories.contains_key(&type_code)
    }

    fn is_supported_body_type(&self, body_type: TypeId) -> bool {
        self.codes_by_body.contains_key(&body_type)
    }
}
