//! Policy table compilation.

use std::collections::HashMap;
use std::sync::Arc;

use cacheprism_core::error::{CachePrismError, Result};
use cacheprism_core::{
    EntityId, LegacyDeclaration, Pattern, PolicyDeclaration, ResolvedPolicy, StructuredDeclaration,
};

use super::catalog::ProfileCatalog;
use crate::config::PolicySettings;

/// Compiled table value.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEntry {
    Enabled(Arc<ResolvedPolicy>),
    /// Declared with an explicit disable. Shadows lower-precedence patterns.
    Disabled,
}

/// Pattern -> normalized policy. Immutable once built.
#[derive(Debug, Default)]
pub struct PolicyTable {
    entries: HashMap<Pattern, TableEntry>,
}

impl PolicyTable {
    /// Compile every rule. Pure function of `settings`; any configuration
    /// error aborts the whole build.
    pub fn build(settings: &PolicySettings) -> Result<Self> {
        let catalog = ProfileCatalog::new(settings)?;

        let mut entries = HashMap::with_capacity(settings.rules.len());
        for (raw, decl) in &settings.rules {
            let pattern = Pattern::parse(raw)?;
            let entry = compile(&catalog, raw, decl)?;
            entries.insert(pattern, entry);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, pattern: &Pattern) -> Option<&TableEntry> {
        self.entries.get(pattern)
    }

    /// First-match lookup over exact, namespace and global candidates.
    /// A disabled match stops the search.
    pub fn lookup(&self, id: &EntityId) -> Option<Arc<ResolvedPolicy>> {
        let entry = id.candidates().iter().find_map(|p| self.entries.get(p))?;
        match entry {
            TableEntry::Enabled(policy) => Some(Arc::clone(policy)),
            TableEntry::Disabled => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn compile(catalog: &ProfileCatalog, pattern: &str, decl: &PolicyDeclaration) -> Result<TableEntry> {
    let policy = match decl {
        PolicyDeclaration::Disabled => return Ok(TableEntry::Disabled),
        PolicyDeclaration::Legacy(legacy) => compile_legacy(catalog, pattern, legacy)?,
        PolicyDeclaration::Structured(d) => compile_structured(catalog, pattern, d)?,
    };
    Ok(TableEntry::Enabled(Arc::new(policy)))
}

fn compile_legacy(
    catalog: &ProfileCatalog,
    pattern: &str,
    legacy: &LegacyDeclaration,
) -> Result<ResolvedPolicy> {
    let profile = catalog
        .get(&legacy.profile)
        .ok_or_else(|| CachePrismError::UnknownProfile {
            pattern: pattern.to_string(),
            profile: legacy.profile.clone(),
        })?;

    let mut mp = match &legacy.overrides {
        Some(overrides) => profile.merged(overrides, pattern)?,
        None => profile.clone(),
    };
    mp.timeout = Some(legacy.timeout);
    mp.finish(pattern)
}

fn compile_structured(
    catalog: &ProfileCatalog,
    pattern: &str,
    decl: &StructuredDeclaration,
) -> Result<ResolvedPolicy> {
    catalog.defaults().merged(decl, pattern)?.finish(pattern)
}
