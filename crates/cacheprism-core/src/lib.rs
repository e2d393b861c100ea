//! cacheprism core: policy model primitives and the shared error type.
//!
//! This crate defines the declaration forms accepted from configuration, the
//! normalized policy value handed to the caching engine, and the error surface
//! shared by the runtime. It carries no backend or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed configuration surfaces as `CachePrismError`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

/// Shared result type.
pub use error::{CachePrismError, ErrorClass, Result};
pub use model::{
    EntityId, LegacyDeclaration, OperationKind, OpsSpec, Pattern, PolicyDeclaration,
    PolicyTemplate, ResolvedPolicy, StructuredDeclaration,
};
