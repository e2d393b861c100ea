//! Normalized policy values.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::declaration::StructuredDeclaration;
use super::ops::OperationKind;
use crate::error::{CachePrismError, Result};

/// Policy in the middle of resolution: defaults, catalog profiles, and merge
/// results. Only `timeout` may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTemplate {
    pub ops: BTreeSet<OperationKind>,
    pub timeout: Option<u64>,
    pub local_get: bool,
    pub db_agnostic: bool,
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for PolicyTemplate {
    /// Global defaults: no ops, no local get, db agnostic.
    fn default() -> Self {
        Self {
            ops: BTreeSet::new(),
            timeout: None,
            local_get: false,
            db_agnostic: true,
            extra: BTreeMap::new(),
        }
    }
}

impl PolicyTemplate {
    /// Merge `decl` over `self`; the declaration wins on every key it sets.
    /// `origin` names the rule or profile for error messages.
    pub fn merged(&self, decl: &StructuredDeclaration, origin: &str) -> Result<Self> {
        let mut out = self.clone();
        if let Some(ops) = &decl.ops {
            out.ops = ops
                .normalize()
                .map_err(|reason| CachePrismError::InvalidDeclaration {
                    pattern: origin.to_string(),
                    reason,
                })?;
        }
        if let Some(t) = decl.timeout {
            out.timeout = Some(t);
        }
        if let Some(v) = decl.local_get {
            out.local_get = v;
        }
        if let Some(v) = decl.db_agnostic {
            out.db_agnostic = v;
        }
        for (k, v) in &decl.extra {
            out.extra.insert(k.clone(), v.clone());
        }
        Ok(out)
    }

    /// Validate and freeze. A missing timeout is fatal.
    pub fn finish(self, pattern: &str) -> Result<ResolvedPolicy> {
        let timeout = self.timeout.ok_or_else(|| CachePrismError::MissingTimeout {
            pattern: pattern.to_string(),
        })?;
        Ok(ResolvedPolicy {
            ops: self.ops,
            timeout,
            local_get: self.local_get,
            db_agnostic: self.db_agnostic,
            extra: self.extra,
        })
    }
}

/// Fully normalized caching policy for an entity (immutable once built).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPolicy {
    pub ops: BTreeSet<OperationKind>,
    /// Seconds.
    pub timeout: u64,
    pub local_get: bool,
    pub db_agnostic: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ResolvedPolicy {
    /// Whether results of `op` are cached under this policy.
    pub fn caches(&self, op: OperationKind) -> bool {
        self.ops.contains(&op)
    }

    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}
