#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use cacheprism_core::{CachePrismError, EntityId, OperationKind, PolicyDeclaration};
use cacheprism_runtime::config::PolicySettings;
use cacheprism_runtime::obs::metrics::CacheMetrics;
use cacheprism_runtime::PolicyRegistry;

fn registry(settings: PolicySettings) -> PolicyRegistry {
    PolicyRegistry::new(settings, Arc::new(CacheMetrics::default()))
}

fn layered() -> PolicySettings {
    PolicySettings::new()
        .with_rule("auth.user", PolicyDeclaration::legacy("get", 10))
        .with_rule("auth.*", PolicyDeclaration::legacy("count", 20))
        .with_rule("*.*", PolicyDeclaration::legacy("all", 30))
}

#[test]
fn exact_match_shadows_wildcards() {
    let reg = registry(layered());
    let p = reg.resolve(&EntityId::new("auth", "user")).unwrap().unwrap();
    assert_eq!(p.timeout, 10);
    assert!(p.caches(OperationKind::Get));
    assert!(!p.caches(OperationKind::Count));
}

#[test]
fn namespace_wildcard_applies_without_exact() {
    let reg = registry(layered());
    let p = reg.resolve(&EntityId::new("auth", "group")).unwrap().unwrap();
    assert_eq!(p.timeout, 20);
}

#[test]
fn global_wildcard_is_last_resort() {
    let reg = registry(layered());
    let p = reg.resolve(&EntityId::new("shop", "order")).unwrap().unwrap();
    assert_eq!(p.timeout, 30);
    assert_eq!(p.ops, OperationKind::full_set());
}

#[test]
fn no_match_resolves_to_none() {
    let reg = registry(PolicySettings::new().with_rule("auth.*", PolicyDeclaration::legacy("all", 1)));
    assert!(reg.resolve(&EntityId::new("shop", "order")).unwrap().is_none());
}

#[test]
fn disable_short_circuits_lower_precedence() {
    let settings = layered()
        .with_rule("auth.session", PolicyDeclaration::Disabled)
        .with_rule("news.*", PolicyDeclaration::Disabled);
    let reg = registry(settings);

    assert!(reg.resolve(&EntityId::new("auth", "session")).unwrap().is_none());
    assert!(reg.resolve(&EntityId::new("news", "post")).unwrap().is_none());
    // unrelated entities still fall through to the global rule
    assert!(reg.resolve(&EntityId::new("shop", "order")).unwrap().is_some());
}

#[test]
fn resolve_is_memoized_and_builds_once() {
    let metrics = Arc::new(CacheMetrics::default());
    let reg = PolicyRegistry::new(layered(), Arc::clone(&metrics));
    assert_eq!(reg.build_count(), 0);

    let id = EntityId::new("auth", "user");
    let first = reg.resolve(&id).unwrap();
    let second = reg.resolve(&id).unwrap();
    let _ = reg.resolve(&EntityId::new("auth", "group")).unwrap();

    assert_eq!(first, second);
    assert!(Arc::ptr_eq(first.as_ref().unwrap(), second.as_ref().unwrap()));
    assert_eq!(reg.build_count(), 1);
    assert_eq!(reg.memoized(), 2);
    assert_eq!(metrics.table_builds.get(&[]), 1);
    assert_eq!(metrics.resolutions.get(&[("source", "memo")]), 1);
    assert_eq!(metrics.resolutions.get(&[("source", "table")]), 2);
    assert_eq!(metrics.memoized_entities.get(&[]), 2);
}

#[test]
fn concurrent_first_access_builds_once() {
    let reg = Arc::new(registry(layered()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                let name = if i % 2 == 0 { "user" } else { "group" };
                reg.resolve(&EntityId::new("auth", name)).unwrap()
            })
        })
        .collect();

    for h in handles {
        assert!(h.join().unwrap().is_some());
    }
    assert_eq!(reg.build_count(), 1);
    assert_eq!(reg.memoized(), 2);
}

#[test]
fn build_errors_surface_on_every_resolve() {
    let reg = registry(PolicySettings::new().with_rule("auth.user", PolicyDeclaration::legacy("missing", 5)));
    let id = EntityId::new("auth", "user");

    for _ in 0..2 {
        let err = reg.resolve(&id).unwrap_err();
        assert!(matches!(err, CachePrismError::UnknownProfile { .. }));
    }
    assert_eq!(reg.build_count(), 0);
    assert_eq!(reg.memoized(), 0);
}
