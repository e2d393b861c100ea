//! Entity identifiers and the patterns that address them.

use std::fmt;
use std::str::FromStr;

use crate::error::{CachePrismError, Result};

/// Wildcard segment.
pub const WILDCARD: &str = "*";

/// Two-segment policy key: `namespace.entity`, either segment may be `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    namespace: String,
    entity: String,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let (namespace, entity) = split_segments(raw)
            .ok_or_else(|| CachePrismError::InvalidPattern(format!("{raw} (expected namespace.entity)")))?;
        Ok(Self {
            namespace: namespace.to_string(),
            entity: entity.to_string(),
        })
    }

    /// `ns.name`
    pub fn exact(id: &EntityId) -> Self {
        Self {
            namespace: id.namespace.clone(),
            entity: id.name.clone(),
        }
    }

    /// `ns.*`
    pub fn namespace_wildcard(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            entity: WILDCARD.to_string(),
        }
    }

    /// `*.*`
    pub fn global() -> Self {
        Self {
            namespace: WILDCARD.to_string(),
            entity: WILDCARD.to_string(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn is_wildcard(&self) -> bool {
        self.namespace == WILDCARD || self.entity == WILDCARD
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.entity)
    }
}

impl FromStr for Pattern {
    type Err = CachePrismError;

    fn from_str(s: &str) -> Result<Self> {
        Pattern::parse(s)
    }
}

/// Opaque identifier of a data entity, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub namespace: String,
    pub name: String,
}

impl EntityId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parse `ns.name`. Wildcards are not entity names.
    pub fn parse(raw: &str) -> Result<Self> {
        match split_segments(raw) {
            Some((ns, name)) if ns != WILDCARD && name != WILDCARD => Ok(Self::new(ns, name)),
            _ => Err(CachePrismError::InvalidPattern(format!(
                "{raw} is not a concrete entity id"
            ))),
        }
    }

    /// Candidate patterns in precedence order: exact, namespace, global.
    pub fn candidates(&self) -> [Pattern; 3] {
        [
            Pattern::exact(self),
            Pattern::namespace_wildcard(&self.namespace),
            Pattern::global(),
        ]
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

fn split_segments(raw: &str) -> Option<(&str, &str)> {
    let (ns, name) = raw.split_once('.')?;
    if ns.is_empty() || name.is_empty() || name.contains('.') {
        return None;
    }
    Some((ns, name))
}
