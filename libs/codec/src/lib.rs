//! # Agent Protocol Codec - Versioned Message-Type Registry
//!
//! ## Purpose
//!
//! This crate contains the "Rules" layer of the agent wire protocol:
//! - The [`TypeLocator`] lookup contract and its immutable [`TypeRegistry`]
//! - Registry construction via [`TypeLocatorBuilder`]
//! - Per-call metadata injection for Extended headers ([`MetadataDecorator`])
//! - Header wire encode/parse
//! - The stock locator for the agent telemetry message set
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → transport
//!     ↑           ↓          ↓
//! Pure Data   Registry    Sockets
//! Structures  Headers
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Body payload encode/decode (downstream serialization pipeline)
//! - Network transport logic
//! - The monitoring system that populates registries at startup
//!
//! ## Concurrency
//!
//! Everything here is synchronous and in-memory. A built registry (and its
//! optional decorator) is shared read-only behind an `Arc`; no lookup takes
//! a lock. Metadata generators are the only collaborators with mutable
//! state and must be `Send + Sync`.

pub mod agent;
pub mod builder;
pub mod decorator;
pub mod error;
pub mod locator;
pub mod wire;

// Re-export key types for convenience
pub use agent::{agent_type_locator, AGENT_INFO, AGENT_STAT_BATCH, SPAN_BATCH};
pub use builder::TypeLocatorBuilder;
pub use decorator::{MetadataDecorator, MetadataGenerator};
pub use error::{ProtocolError, ProtocolResult};
pub use locator::{BodyFactory, HeaderFactory, TypeLocator, TypeRegistry};
pub use wire::{encode_header, parse_header, FIXED_HEADER_LEN};
