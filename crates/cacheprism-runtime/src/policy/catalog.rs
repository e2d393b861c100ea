//! Named legacy profiles referenced by tuple-style declarations.

use std::collections::HashMap;

use cacheprism_core::error::Result;
use cacheprism_core::{OperationKind, OpsSpec, PolicyTemplate, StructuredDeclaration};

use crate::config::PolicySettings;

/// Built-in profile names.
pub const BUILTIN_PROFILES: [&str; 4] = ["just_enable", "all", "get", "count"];

fn builtin(name: &str) -> StructuredDeclaration {
    let d = StructuredDeclaration::default();
    match name {
        "all" => d.with_ops(OpsSpec::all()),
        "get" => d.with_ops(OpsSpec::of(&[OperationKind::Get])),
        "count" => d.with_ops(OpsSpec::of(&[OperationKind::Count])),
        _ => d,
    }
}

/// Effective defaults plus every named profile, each already merged over
/// those defaults.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    defaults: PolicyTemplate,
    profiles: HashMap<String, PolicyTemplate>,
}

impl ProfileCatalog {
    pub fn new(settings: &PolicySettings) -> Result<Self> {
        let defaults = PolicyTemplate::default().merged(&settings.defaults, "defaults")?;

        let mut profiles = HashMap::with_capacity(BUILTIN_PROFILES.len() + settings.profiles.len());
        for name in BUILTIN_PROFILES {
            profiles.insert(name.to_string(), defaults.merged(&builtin(name), name)?);
        }
        // user profiles may shadow built-ins
        for (name, decl) in &settings.profiles {
            profiles.insert(name.clone(), defaults.merged(decl, name)?);
        }

        Ok(Self { defaults, profiles })
    }

    pub fn defaults(&self) -> &PolicyTemplate {
        &self.defaults
    }

    pub fn get(&self, name: &str) -> Option<&PolicyTemplate> {
        self.profiles.get(name)
    }
}
