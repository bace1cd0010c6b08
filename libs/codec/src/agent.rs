//! Stock locator for the agent telemetry message set.
//!
//! This is the wiring a collector performs at startup: validate the
//! negotiated version byte, register the known telemetry bodies, and wrap
//! the registry in a metadata decorator when the Extended layout is in
//! play.

use std::sync::Arc;

use types::{AgentInfo, AgentStatBatch, HeaderVersion, SpanBatch};

use crate::builder::TypeLocatorBuilder;
use crate::decorator::{MetadataDecorator, MetadataGenerator};
use crate::error::ProtocolResult;
use crate::locator::TypeLocator;

/// Type code for a batch of completed trace spans.
pub const SPAN_BATCH: i16 = 40;

/// Type code for the agent registration payload.
pub const AGENT_INFO: i16 = 50;

/// Type code for a batch of agent resource snapshots.
pub const AGENT_STAT_BATCH: i16 = 1000;

/// Build the stock locator for agent telemetry messages.
///
/// The version byte is validated before any registration. For the Basic
/// layout the bare registry is returned; for Extended it is wrapped so
/// every header picks up fresh metadata from `generator` at lookup time.
pub fn agent_type_locator(
    version: u8,
    generator: Arc<dyn MetadataGenerator>,
) -> ProtocolResult<Arc<dyn TypeLocator>> {
    let mut builder = TypeLocatorBuilder::for_version_byte(version)?;
    builder.register(SPAN_BATCH, SpanBatch::default)?;
    builder.register(AGENT_INFO, AgentInfo::default)?;
    builder.register(AGENT_STAT_BATCH, AgentStatBatch::default)?;
    let registry = builder.build();

    match registry.version() {
        HeaderVersion::Basic => Ok(Arc::new(registry)),
        HeaderVersion::Extended => Ok(Arc::new(MetadataDecorator::new(
            Arc::new(registry),
            generator,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use std::collections::HashMap;

    fn empty_generator() -> Arc<dyn MetadataGenerator> {
        Arc::new(|| HashMap::<String, String>::new())
    }

    #[test]
    fn test_basic_locator_produces_bare_headers() {
        let locator = agent_type_locator(0x10, empty_generator()).unwrap();
        let header = locator.header_lookup(AGENT_STAT_BATCH).unwrap();
        assert!(header.metadata().is_none());
    }

    #[test]
    fn test_extended_locator_is_decorated() {
        let locator = agent_type_locator(0x20, empty_generator()).unwrap();
        let header = locator.header_lookup(SPAN_BATCH).unwrap();
        assert!(header.metadata().is_some());
    }

    #[test]
    fn test_unknown_version_byte_fails_before_any_lookup() {
        match agent_type_locator(0x00, empty_generator()) {
            Err(err) => {
                assert!(matches!(
                    err,
                    ProtocolError::UnsupportedVersion { version: 0x00, .. }
                ));
                assert!(!err.is_not_found());
            }
            Ok(_) => panic!("version byte 0x00 must be rejected"),
        }
    }

    #[test]
    fn test_all_stock_codes_registered() {
        let locator = agent_type_locator(0x10, empty_generator()).unwrap();
        for code in [SPAN_BATCH, AGENT_INFO, AGENT_STAT_BATCH] {
            assert!(locator.is_supported(code));
        }
        assert!(!locator.is_supported(999));
    }
}
