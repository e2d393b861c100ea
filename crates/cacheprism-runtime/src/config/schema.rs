use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use cacheprism_core::error::{CachePrismError, Result};
use cacheprism_core::{Pattern, PolicyDeclaration, StructuredDeclaration};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    pub version: u32,

    #[serde(default)]
    pub degrade_on_failure: bool,

    #[serde(default)]
    pub lru: bool,

    #[serde(default)]
    pub backend: BackendSection,

    #[serde(default)]
    pub defaults: Option<StructuredDeclaration>,

    /// Legacy named profiles (added to or replacing the built-ins).
    #[serde(default)]
    pub profiles: IndexMap<String, StructuredDeclaration>,

    /// Pattern -> declaration. A repeated pattern keeps the last value.
    #[serde(default, deserialize_with = "deserialize_rules")]
    pub rules: IndexMap<String, PolicyDeclaration>,
}

impl CacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CachePrismError::UnsupportedVersion(self.version));
        }
        for pattern in self.rules.keys() {
            Pattern::parse(pattern)?;
        }
        if self.profiles.keys().any(|name| name.is_empty()) {
            return Err(CachePrismError::BadConfig("profile names must not be empty".into()));
        }
        Ok(())
    }

    /// Policy inputs, read once by the table builder.
    pub fn policy_settings(&self) -> PolicySettings {
        PolicySettings {
            defaults: self.defaults.clone().unwrap_or_default(),
            profiles: self.profiles.clone(),
            rules: self.rules.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendSection {
    /// Connection alias handed to the factory. Checked at connect time.
    #[serde(default)]
    pub cache_alias: Option<String>,
}

/// Everything the policy table is built from. Frozen at first build.
#[derive(Debug, Clone, Default)]
pub struct PolicySettings {
    /// Overrides for the global defaults.
    pub defaults: StructuredDeclaration,
    pub profiles: IndexMap<String, StructuredDeclaration>,
    pub rules: IndexMap<String, PolicyDeclaration>,
}

impl PolicySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(mut self, defaults: StructuredDeclaration) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_profile(mut self, name: impl Into<String>, profile: StructuredDeclaration) -> Self {
        self.profiles.insert(name.into(), profile);
        self
    }

    /// Declare a rule. Re-declaring a pattern replaces it (last write wins).
    pub fn declare(&mut self, pattern: impl Into<String>, decl: impl Into<PolicyDeclaration>) {
        insert_rule(&mut self.rules, pattern.into(), decl.into());
    }

    pub fn with_rule(mut self, pattern: impl Into<String>, decl: impl Into<PolicyDeclaration>) -> Self {
        self.declare(pattern, decl);
        self
    }
}

/// Insert moving the pattern to the end, so iteration order matches
/// declaration order of the winning value.
fn insert_rule(rules: &mut IndexMap<String, PolicyDeclaration>, pattern: String, decl: PolicyDeclaration) {
    if rules.shift_remove(&pattern).is_some() {
        tracing::warn!(%pattern, "cache rule re-declared; last declaration wins");
    }
    rules.insert(pattern, decl);
}

/// Rules map that names the offending pattern on a bad value and does not
/// silently drop repeated keys.
fn deserialize_rules<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, PolicyDeclaration>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RulesVisitor;

    impl<'de> Visitor<'de> for RulesVisitor {
        type Value = IndexMap<String, PolicyDeclaration>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping of pattern to cache declaration")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut rules = IndexMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pattern) = map.next_key::<String>()? {
                let raw: serde_yaml::Value = map.next_value()?;
                let decl = serde_yaml::from_value::<PolicyDeclaration>(raw).map_err(|e| {
                    de::Error::custom(format!(
                        "rule {pattern}: expected ~, [profile, timeout(, overrides)] or a policy map ({e})"
                    ))
                })?;
                insert_rule(&mut rules, pattern, decl);
            }
            Ok(rules)
        }
    }

    deserializer.deserialize_map(RulesVisitor)
}
