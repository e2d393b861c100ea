//! Top-level facade crate for cacheprism.
//!
//! Re-exports the policy model and the runtime so users can depend on a single crate.

pub mod core {
    pub use cacheprism_core::*;
}

pub mod runtime {
    pub use cacheprism_runtime::*;
}
