//! Cached query operations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel accepted in place of an operation list.
pub const ALL_SENTINEL: &str = "all";

/// Query operation whose results may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Get,
    Fetch,
    Count,
    Exists,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Get,
        OperationKind::Fetch,
        OperationKind::Count,
        OperationKind::Exists,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Get => "get",
            OperationKind::Fetch => "fetch",
            OperationKind::Count => "count",
            OperationKind::Exists => "exists",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }

    /// The full operation set (what `"all"` expands to).
    pub fn full_set() -> BTreeSet<OperationKind> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ops` as written in configuration: a single name, `"all"`, or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpsSpec {
    One(String),
    Many(Vec<String>),
}

impl OpsSpec {
    pub fn all() -> Self {
        OpsSpec::One(ALL_SENTINEL.to_string())
    }

    pub fn of(ops: &[OperationKind]) -> Self {
        OpsSpec::Many(ops.iter().map(|op| op.as_str().to_string()).collect())
    }

    /// Normalize into a set. The error carries the offending name.
    pub fn normalize(&self) -> std::result::Result<BTreeSet<OperationKind>, String> {
        match self {
            OpsSpec::One(s) if s == ALL_SENTINEL => Ok(OperationKind::full_set()),
            OpsSpec::One(s) => parse_op(s).map(|op| BTreeSet::from([op])),
            OpsSpec::Many(names) => names.iter().map(|s| parse_op(s)).collect(),
        }
    }
}

fn parse_op(s: &str) -> std::result::Result<OperationKind, String> {
    OperationKind::parse(s).ok_or_else(|| format!("unknown operation \"{s}\""))
}
