//! cacheprism runtime library entry.
//!
//! This crate wires configuration loading, the policy table builder, the
//! memoizing resolver, and the degradation guard into one runtime the caching
//! engine consumes. It is used by the inspection binary (`main.rs`) and by
//! integration tests.

pub mod backend;
pub mod config;
pub mod guard;
pub mod obs;
pub mod policy;
pub mod runtime;

pub use guard::DegradationGuard;
pub use policy::PolicyRegistry;
pub use runtime::CacheRuntime;
