//! Policy model: what configuration may declare and what resolution yields.
//!
//! Declarations come in three shapes (structured map, legacy profile tuple,
//! explicit disable). All of them normalize into a [`ResolvedPolicy`] through
//! a [`PolicyTemplate`] merge.

pub mod declaration;
pub mod ops;
pub mod pattern;
pub mod resolved;

pub use declaration::{LegacyDeclaration, PolicyDeclaration, StructuredDeclaration};
pub use ops::{OperationKind, OpsSpec};
pub use pattern::{EntityId, Pattern};
pub use resolved::{PolicyTemplate, ResolvedPolicy};
