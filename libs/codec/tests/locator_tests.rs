//! # Codec Integration Tests
//!
//! End-to-end coverage of the versioned type registry through the public
//! API: fresh body construction, NotFound behavior, version-specific
//! header shapes, and per-call metadata refresh through the decorator.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use codec::{
    agent_type_locator, MetadataDecorator, MetadataGenerator, ProtocolError, TypeLocator,
    TypeLocatorBuilder, AGENT_STAT_BATCH,
};
use types::{AgentInfo, AgentStatBatch, HeaderVersion, SpanBatch, HEADER_SIGNATURE};

/// Generator returning {"seq": "1"}, {"seq": "2"}, ... on successive calls.
struct SequenceGenerator {
    counter: AtomicU64,
}

impl SequenceGenerator {
    fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }
}

impl MetadataGenerator for SequenceGenerator {
    fn generate(&self) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        let seq = self.counter.fetch_add(1, Ordering::SeqCst);
        metadata.insert("seq".to_string(), seq.to_string());
        metadata
    }
}

#[test]
fn test_body_lookup_returns_fresh_instance_every_call() {
    let mut builder = TypeLocatorBuilder::new(HeaderVersion::Basic);
    builder.register(AGENT_STAT_BATCH, AgentStatBatch::default).unwrap();
    let registry = builder.build();

    let first = registry.body_lookup(AGENT_STAT_BATCH).unwrap();
    let second = registry.body_lookup(AGENT_STAT_BATCH).unwrap();

    let first = first.as_any().downcast_ref::<AgentStatBatch>().unwrap();
    let second = second.as_any().downcast_ref::<AgentStatBatch>().unwrap();
    assert_ne!(first as *const AgentStatBatch, second as *const AgentStatBatch);
    assert_eq!(first, &AgentStatBatch::default());
}

#[test]
fn test_unregistered_code_fails_not_found_everywhere() {
    let mut builder = TypeLocatorBuilder::new(HeaderVersion::Basic);
    builder.register(AGENT_STAT_BATCH, AgentStatBatch::default).unwrap();
    let registry = builder.build();

    assert!(registry.body_lookup(7).unwrap_err().is_not_found());
    assert!(registry.header_lookup(7).unwrap_err().is_not_found());
    assert!(!registry.is_supported(7));
    assert!(!registry.is_supported_body_type(TypeId::of::<SpanBatch>()));
    assert!(registry
        .header_lookup_for_body(&SpanBatch::default())
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_basic_registry_never_produces_metadata() {
    let mut builder = TypeLocatorBuilder::new(HeaderVersion::Basic);
    builder.register(50, AgentInfo::default).unwrap();
    let registry = builder.build();

    let header = registry.header_lookup(50).unwrap();
    assert!(header.metadata().is_none());
    assert_eq!(header.version(), HeaderVersion::Basic.as_byte());
    assert_eq!(header.signature(), HEADER_SIGNATURE);
}

#[test]
fn test_undecorated_extended_registry_yields_empty_metadata() {
    // A legitimate configuration, not an error.
    let mut builder = TypeLocatorBuilder::new(HeaderVersion::Extended);
    builder.register(50, AgentInfo::default).unwrap();
    let registry = builder.build();

    let header = registry.header_lookup(50).unwrap();
    assert!(header.metadata().unwrap().is_empty());
}

#[test]
fn test_decorated_scenario_agent_stat_batch() {
    // Register 1000 -> AgentStatBatch, build Extended, wrap with a
    // sequence generator; successive header lookups see seq 1 then 2,
    // body lookups are unaffected by header state.
    let mut builder = TypeLocatorBuilder::new(HeaderVersion::Extended);
    builder.register(AGENT_STAT_BATCH, AgentStatBatch::default).unwrap();
    let registry = Arc::new(builder.build());
    let decorator =
        MetadataDecorator::new(registry, Arc::new(SequenceGenerator::new())).unwrap();

    let first = decorator.header_lookup(AGENT_STAT_BATCH).unwrap();
    assert_eq!(first.type_code(), AGENT_STAT_BATCH);
    assert_eq!(first.metadata().unwrap()["seq"], "1");

    let body = decorator.body_lookup(AGENT_STAT_BATCH).unwrap();
    assert!(body.as_any().downcast_ref::<AgentStatBatch>().is_some());

    let second = decorator.header_lookup(AGENT_STAT_BATCH).unwrap();
    assert_eq!(second.metadata().unwrap()["seq"], "2");

    assert_eq!(first.signature(), second.signature());
    assert_eq!(first.version(), second.version());
    assert_eq!(first.type_code(), second.type_code());
}

#[test]
fn test_stock_locator_version_dispatch() {
    let generator: Arc<dyn MetadataGenerator> = Arc::new(SequenceGenerator::new());

    let basic = agent_type_locator(0x10, generator.clone()).unwrap();
    assert!(basic.header_lookup(AGENT_STAT_BATCH).unwrap().metadata().is_none());

    let extended = agent_type_locator(0x20, generator).unwrap();
    let header = extended.header_lookup(AGENT_STAT_BATCH).unwrap();
    assert_eq!(header.metadata().unwrap()["seq"], "1");
}

#[test]
fn test_unsupported_version_byte_fails_at_construction() {
    let err = TypeLocatorBuilder::for_version_byte(0x15).unwrap_err();
    assert!(matches!(err, ProtocolError::UnsupportedVersion { version: 0x15, .. }));

    let generator: Arc<dyn MetadataGenerator> = Arc::new(SequenceGenerator::new());
    assert!(agent_type_locator(0xFF, generator).is_err());
}

#[test]
fn test_concurrent_lookups_get_distinct_metadata() {
    let mut builder = TypeLocatorBuilder::new(HeaderVersion::Extended);
    builder.register(AGENT_STAT_BATCH, AgentStatBatch::default).unwrap();
    let decorator = Arc::new(
        MetadataDecorator::new(Arc::new(builder.build()), Arc::new(SequenceGenerator::new()))
            .unwrap(),
    );

    let mut handles = Vec::new();
    for _ in 0..8 {
        let decorator = Arc::clone(&decorator);
        handles.push(thread::spawn(move || {
            let mut seqs = Vec::new();
            for _ in 0..100 {
                let header = decorator.header_lookup(AGENT_STAT_BATCH).unwrap();
                seqs.push(header.metadata().unwrap()["seq"].clone());
            }
            seqs
        }));
    }

    let mut all: Vec<String> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    all.sort();
    all.dedup();
    // Each lookup consumed the generator exactly once.
    assert_eq!(all.len(), 800);
}
