#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;

use cacheprism_core::{
    OperationKind, OpsSpec, PolicyDeclaration, PolicyTemplate, StructuredDeclaration,
};
use serde_json::json;

fn decl(v: serde_json::Value) -> PolicyDeclaration {
    serde_json::from_value(v).expect("declaration must parse")
}

#[test]
fn null_is_explicit_disable() {
    assert_eq!(decl(json!(null)), PolicyDeclaration::Disabled);
}

#[test]
fn two_element_tuple_is_legacy() {
    let d = decl(json!(["all", 60]));
    assert_eq!(d, PolicyDeclaration::legacy("all", 60));
}

#[test]
fn three_element_tuple_carries_overrides() {
    let d = decl(json!(["get", 30, {"local_get": true, "lock": true}]));
    let PolicyDeclaration::Legacy(l) = d else {
        panic!("expected legacy form");
    };
    assert_eq!(l.profile, "get");
    assert_eq!(l.timeout, 30);
    let o = l.overrides.expect("overrides");
    assert_eq!(o.local_get, Some(true));
    assert_eq!(o.extra.get("lock"), Some(&json!(true)));
}

#[test]
fn tuple_with_wrong_arity_is_rejected() {
    assert!(serde_json::from_value::<PolicyDeclaration>(json!(["all"])).is_err());
    assert!(serde_json::from_value::<PolicyDeclaration>(json!(["all", 1, {}, 4])).is_err());
}

#[test]
fn map_is_structured_with_extras() {
    let d = decl(json!({"ops": "get", "timeout": 900, "cache_on_save": true}));
    let PolicyDeclaration::Structured(s) = d else {
        panic!("expected structured form");
    };
    assert_eq!(s.ops, Some(OpsSpec::One("get".into())));
    assert_eq!(s.timeout, Some(900));
    assert_eq!(s.local_get, None);
    assert_eq!(s.extra.get("cache_on_save"), Some(&json!(true)));
}

#[test]
fn non_numeric_timeout_is_rejected() {
    assert!(serde_json::from_value::<PolicyDeclaration>(json!({"timeout": "soon"})).is_err());
}

#[test]
fn ops_all_expands_to_full_set() {
    let set = OpsSpec::all().normalize().unwrap();
    assert_eq!(set, OperationKind::full_set());
    assert_eq!(set.len(), 4);
}

#[test]
fn single_op_becomes_one_element_set() {
    let set = OpsSpec::One("get".into()).normalize().unwrap();
    assert_eq!(set, BTreeSet::from([OperationKind::Get]));
}

#[test]
fn op_list_is_deduplicated() {
    let spec = OpsSpec::Many(vec!["count".into(), "exists".into(), "count".into()]);
    let set = spec.normalize().unwrap();
    assert_eq!(set, BTreeSet::from([OperationKind::Count, OperationKind::Exists]));
}

#[test]
fn unknown_op_is_reported_by_name() {
    let err = OpsSpec::One("delete".into()).normalize().unwrap_err();
    assert!(err.contains("delete"));
}

#[test]
fn merge_prefers_declaration_and_requires_timeout() {
    let base = PolicyTemplate::default();
    let d = StructuredDeclaration::default()
        .with_ops(OpsSpec::One("count".into()))
        .with_db_agnostic(false);
    let merged = base.merged(&d, "app.thing").unwrap();
    assert!(!merged.db_agnostic);
    assert!(!merged.local_get);

    let err = merged.clone().finish("app.thing").unwrap_err();
    assert_eq!(err.error_class().as_str(), "CONFIGURATION");
    assert!(err.to_string().contains("app.thing"));

    let p = base
        .merged(&d.with_timeout(5), "app.thing")
        .unwrap()
        .finish("app.thing")
        .unwrap();
    assert_eq!(p.timeout, 5);
    assert!(p.caches(OperationKind::Count));
    assert!(!p.caches(OperationKind::Get));
}
