//! Per-call metadata injection for Extended headers.
//!
//! Body-factory registration and header-version behavior are orthogonal:
//! the base registry owns the type-code table, the decorator owns the
//! Extended metadata-refresh policy. Swapping the policy never touches the
//! table.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use types::{Header, HeaderVersion, MessageBody};

use crate::error::{ProtocolError, ProtocolResult};
use crate::locator::{TypeLocator, TypeRegistry};

/// External capability producing fresh key-value data for Extended headers.
///
/// Invoked exactly once per header lookup; results are never cached.
/// Implementations may hold interior mutable state (sequence counters,
/// clocks) and must stay safe under concurrent invocation. No ordering is
/// guaranteed between concurrent calls; each returns an independent,
/// internally-consistent snapshot.
pub trait MetadataGenerator: Send + Sync {
    fn generate(&self) -> HashMap<String, String>;
}

impl<F> MetadataGenerator for F
where
    F: Fn() -> HashMap<String, String> + Send + Sync,
{
    fn generate(&self) -> HashMap<String, String> {
        self()
    }
}

/// Wraps an Extended-version [`TypeRegistry`] and replaces the metadata
/// map of every header it hands out with a freshly generated one.
///
/// Body lookups and membership checks pass through untouched; metadata
/// must reflect the moment of lookup, not of registry construction.
pub struct MetadataDecorator {
    base: Arc<TypeRegistry>,
    generator: Arc<dyn MetadataGenerator>,
}

impl std::fmt::Debug for MetadataDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataDecorator")
            .field("base", &self.base)
            .finish()
    }
}

impl MetadataDecorator {
    /// Compose with a base registry built for the Extended layout.
    ///
    /// Fails with `VersionMismatch` for a Basic base: there is no metadata
    /// field to refresh.
    pub fn new(
        base: Arc<TypeRegistry>,
        generator: Arc<dyn MetadataGenerator>,
    ) -> ProtocolResult<Self> {
        if base.version() != HeaderVersion::Extended {
            return Err(ProtocolError::VersionMismatch {
                version: base.version().as_byte(),
            });
        }

        debug!(codes = base.len(), "metadata decorator attached");
        Ok(Self { base, generator })
    }

    fn refresh(&self, header: &Header) -> Header {
        Header::extended(header.type_code(), self.generator.generate())
    }
}

impl TypeLocator for MetadataDecorator {
    fn body_lookup(&self, type_code: i16) -> ProtocolResult<Box<dyn MessageBody>> {
        self.base.body_lookup(type_code)
    }

    fn header_lookup(&self, type_code: i16) -> ProtocolResult<Header> {
        let header = self.base.header_lookup(type_code)?;
        Ok(self.refresh(&header))
    }

    fn header_lookup_for_body(&self, body: &dyn MessageBody) -> ProtocolResult<Header> {
        let header = self.base.header_lookup_for_body(body)?;
        Ok(self.refresh(&header))
    }

    fn is_supported(&self, type_code: i16) -> bool {
        self.base.is_supported(type_code)
    }

    fn is_supported_body_type(&self, body_type: std::any::TypeId) -> bool {
        self.base.is_supported_body_type(body_type)
    }
}
