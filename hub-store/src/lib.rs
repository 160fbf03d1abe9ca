//! Object store gateway for the metadata hub.
//!
//! This crate normalizes virtual paths, lists entries under a prefix with
//! glob-style filtering, and performs existence/read/write/delete operations
//! against any backend implementing [`ObjectClient`]. It performs no caching
//! and no record parsing.

#![warn(missing_docs, clippy::pedantic)]

mod client;
mod error;
mod fs;
mod gateway;
mod memory;
mod pattern;

/// Raw byte-level store operations and the streaming read alias.
pub use client::{ObjectClient, ObjectStream};
/// Error type and result alias for store operations.
pub use error::{StoreError, StoreResult};
/// Local-filesystem reference backend.
pub use fs::FsObjectStore;
/// Domain-facing gateway and its per-domain listing scope.
pub use gateway::{PatternScope, StoreGateway};
/// In-memory reference backend.
pub use memory::MemoryObjectStore;
/// Glob-style wildcard matching (`*` and `?`).
pub use pattern::wildcard_match;
