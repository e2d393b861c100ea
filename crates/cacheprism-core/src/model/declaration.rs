//! Declaration forms accepted from configuration.
//!
//! A rule value is one of:
//! - `~` / `null`: explicit disable,
//! - `[profile, timeout]` or `[profile, timeout, {overrides}]`: legacy profile tuple,
//! - `{ops, timeout, local_get, db_agnostic, ...}`: structured declaration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ops::OpsSpec;

/// Partial policy: every field may be omitted and is then inherited.
/// Unknown keys are carried through as extra options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ops: Option<OpsSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_get: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_agnostic: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl StructuredDeclaration {
    pub fn with_ops(mut self, ops: OpsSpec) -> Self {
        self.ops = Some(ops);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Some(secs);
        self
    }

    pub fn with_local_get(mut self, v: bool) -> Self {
        self.local_get = Some(v);
        self
    }

    pub fn with_db_agnostic(mut self, v: bool) -> Self {
        self.db_agnostic = Some(v);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Older tuple form referencing a named profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "LegacyRepr")]
pub struct LegacyDeclaration {
    pub profile: String,
    pub timeout: u64,
    pub overrides: Option<StructuredDeclaration>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyRepr {
    WithOverrides(String, u64, StructuredDeclaration),
    Plain(String, u64),
}

impl From<LegacyRepr> for LegacyDeclaration {
    fn from(r: LegacyRepr) -> Self {
        match r {
            LegacyRepr::WithOverrides(profile, timeout, overrides) => Self {
                profile,
                timeout,
                overrides: Some(overrides),
            },
            LegacyRepr::Plain(profile, timeout) => Self {
                profile,
                timeout,
                overrides: None,
            },
        }
    }
}

/// One rule value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PolicyDeclaration {
    Disabled,
    Legacy(LegacyDeclaration),
    Structured(StructuredDeclaration),
}

impl PolicyDeclaration {
    pub fn legacy(profile: impl Into<String>, timeout: u64) -> Self {
        PolicyDeclaration::Legacy(LegacyDeclaration {
            profile: profile.into(),
            timeout,
            overrides: None,
        })
    }

    pub fn legacy_with(
        profile: impl Into<String>,
        timeout: u64,
        overrides: StructuredDeclaration,
    ) -> Self {
        PolicyDeclaration::Legacy(LegacyDeclaration {
            profile: profile.into(),
            timeout,
            overrides: Some(overrides),
        })
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, PolicyDeclaration::Disabled)
    }
}

impl From<StructuredDeclaration> for PolicyDeclaration {
    fn from(d: StructuredDeclaration) -> Self {
        PolicyDeclaration::Structured(d)
    }
}
