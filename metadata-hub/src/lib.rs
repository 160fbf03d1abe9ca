//! Metadata hub SDK facade.
//!
//! Depend on this crate via `cargo add metadata-hub`. It bundles the internal
//! hub crates behind feature flags so hosts can enable or disable components
//! as needed.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use hub_primitives as primitives;

/// Object store gateway and reference backends (enabled by `store` feature).
#[cfg(feature = "store")]
pub use hub_store as store;

/// Repositories, resolvers, and the snapshot cache (enabled by `core` feature).
#[cfg(feature = "core")]
pub use hub_core as core;
