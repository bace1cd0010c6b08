//! Registry construction. The builder exists only during setup; the
//! registry it produces is immutable afterwards.

use std::any::TypeId;
use std::collections::HashMap;

use tracing::debug;
use types::{HeaderVersion, MessageBody};

use crate::error::{ProtocolError, ProtocolResult};
use crate::locator::{BodyFactory, HeaderFactory, TypeRegistry, VersionedHeaderFactory};

/// Accumulates type-code registrations and builds an immutable
/// [`TypeRegistry`] bound to a header factory for the configured version.
///
/// Duplicate registrations are rejected: a type code binds exactly one
/// factory, and a concrete body type maps back to exactly one code.
pub struct TypeLocatorBuilder {
    version: HeaderVersion,
    header_factory: Option<Box<dyn HeaderFactory>>,
    factories: HashMap<i16, Box<dyn BodyFactory>>,
    codes_by_body: HashMap<TypeId, i16>,
}

impl std::fmt::Debug for TypeLocatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeLocatorBuilder")
            .field("version", &self.version)
            .field("codes", &self.factories.len())
            .finish()
    }
}

impl TypeLocatorBuilder {
    pub fn new(version: HeaderVersion) -> Self {
        Self {
            version,
            header_factory: None,
            factories: HashMap::new(),
            codes_by_body: HashMap::new(),
        }
    }

    /// Create a builder from a raw negotiated version byte.
    ///
    /// Fails with `UnsupportedVersion` before any registration happens.
    pub fn for_version_byte(version: u8) -> ProtocolResult<Self> {
        let version =
            HeaderVersion::try_from(version).map_err(|_| ProtocolError::unsupported_version(version))?;
        Ok(Self::new(version))
    }

    /// Replace the stock version-selected header factory.
    pub fn with_header_factory(mut self, factory: Box<dyn HeaderFactory>) -> Self {
        self.header_factory = Some(factory);
        self
    }

    /// Bind a type code to a body factory.
    ///
    /// The factory is any `Fn() -> B` producing a fresh empty body; the
    /// concrete type `B` is captured here for the reverse lookup.
    pub fn register<B, F>(&mut self, type_code: i16, factory: F) -> ProtocolResult<&mut Self>
    where
        B: MessageBody,
        F: Fn() -> B + Send + Sync + 'static,
    {
        if self.factories.contains_key(&type_code) {
            return Err(ProtocolError::DuplicateTypeCode { type_code });
        }
        let body_type = TypeId::of::<B>();
        if self.codes_by_body.contains_key(&body_type) {
            return Err(ProtocolError::DuplicateBodyType {
                type_name: std::any::type_name::<B>(),
            });
        }

        let erased = move || Box::new(factory()) as Box<dyn MessageBody>;
        self.factories.insert(type_code, Box::new(erased));
        self.codes_by_body.insert(body_type, type_code);
        Ok(self)
    }

    /// Build the immutable registry. Zero registrations is legal.
    pub fn build(self) -> TypeRegistry {
        let header_factory = self
            .header_factory
            .unwrap_or_else(|| Box::new(VersionedHeaderFactory::new(self.version)));

        debug!(
            version = self.version.as_byte(),
            codes = self.factories.len(),
            "type registry built"
        );

        TypeRegistry::new(
            self.version,
            header_factory,
            self.factories,
            self.codes_by_body,
        )
    }
}
