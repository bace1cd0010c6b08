//! # Agent Wire Protocol Types
//!
//! ## Purpose
//!
//! Pure data structures for the agent telemetry wire protocol:
//! - Protocol constants and the recognized header versions
//! - The version-specific `Header` envelope
//! - The `MessageBody` trait and the concrete telemetry bodies
//!
//! ## What This Crate Does NOT Contain
//! - Protocol rules, registries, or encoding logic (belongs in libs/codec)
//! - Network transport or socket management
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → transport
//!     ↑            ↓            ↓
//! Pure Data   Protocol Rules  Sockets
//! Structures  Registry/Codec
//! ```

pub mod messages;
pub mod protocol;

// Re-export key types for convenience
pub use messages::{AgentInfo, AgentStat, AgentStatBatch, MessageBody, SpanBatch, SpanRecord};
pub use protocol::constants::{HeaderVersion, HEADER_SIGNATURE};
pub use protocol::header::Header;
