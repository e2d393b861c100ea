//! Policy layer (profile catalog, table builder, memoizing resolver).
//!
//! Compiles declarative cache rules into a pattern table once per process and
//! answers per-entity lookups for the caching engine.

pub mod catalog;
pub mod registry;
pub mod table;

pub use catalog::ProfileCatalog;
pub use registry::PolicyRegistry;
pub use table::{PolicyTable, TableEntry};
