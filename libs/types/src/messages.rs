//! Concrete telemetry message bodies and the trait they share.
//!
//! Bodies are pure data. The codec's type registry maps wire type codes to
//! factories producing these, and resolves bodies back to codes by their
//! concrete `TypeId`.

use std::any::Any;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// One message-body shape carried on the wire.
///
/// Object-safe so the registry can hand out `Box<dyn MessageBody>` without
/// knowing concrete types. `as_any` exposes the concrete `TypeId` for the
/// reverse (body to type code) lookup.
pub trait MessageBody: Any + Send + Debug {
    fn as_any(&self) -> &dyn Any;

    /// Wire-level name of the message, used in diagnostics.
    fn message_name(&self) -> &'static str;
}

/// A single periodic resource snapshot from one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStat {
    pub timestamp: i64,
    pub collect_interval: i64,
    pub heap_used: i64,
    pub heap_max: i64,
    pub system_cpu_load: f64,
}

/// A batch of agent resource snapshots, flushed on an interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStatBatch {
    pub agent_id: String,
    pub start_timestamp: i64,
    pub stats: Vec<AgentStat>,
}

impl MessageBody for AgentStatBatch {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message_name(&self) -> &'static str {
        "AgentStatBatch"
    }
}

/// Agent registration payload, sent once at agent startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub agent_id: String,
    pub hostname: String,
    pub service_type: i16,
    pub start_timestamp: i64,
}

impl MessageBody for AgentInfo {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message_name(&self) -> &'static str {
        "AgentInfo"
    }
}

/// One completed trace span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    pub trace_id: i64,
    pub span_id: i64,
    pub parent_span_id: i64,
    pub elapsed_ms: i32,
}

/// A batch of completed spans from one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanBatch {
    pub agent_id: String,
    pub spans: Vec<SpanRecord>,
}

impl MessageBody for SpanBatch {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message_name(&self) -> &'static str {
        "SpanBatch"
    }
}
