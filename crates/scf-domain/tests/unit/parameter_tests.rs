//! Unit tests for parameter placeholder resolution

use indexmap::IndexMap;
use scf_domain::{Error, ParameterBag};
use serde_json::{Value, json};

fn bag(entries: &[(&str, Value)]) -> ParameterBag {
    let map: IndexMap<String, Value> = entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect();
    ParameterBag::from_map(map)
}

#[test]
fn test_whole_placeholder_keeps_type() {
    let bag = bag(&[("port", json!(8080)), ("hosts", json!(["a", "b"]))]);

    assert_eq!(bag.resolve_string("%port%").expect("resolves"), json!(8080));
    assert_eq!(
        bag.resolve_string("%hosts%").expect("resolves"),
        json!(["a", "b"])
    );
}

#[test]
fn test_embedded_placeholders_interpolate() {
    let bag = bag(&[("host", json!("localhost")), ("port", json!(8080))]);

    let resolved = bag.resolve_string("http://%host%:%port%/").expect("resolves");
    assert_eq!(resolved, json!("http://localhost:8080/"));
}

#[test]
fn test_double_percent_is_literal() {
    let bag = bag(&[("rate", json!(50))]);

    assert_eq!(
        bag.resolve_string("%rate%%% off").expect("resolves"),
        json!("50% off")
    );
    assert_eq!(bag.resolve_string("100%%").expect("resolves"), json!("100%"));
}

#[test]
fn test_lone_percent_is_left_alone() {
    let bag = ParameterBag::new();
    assert_eq!(
        bag.resolve_string("50% of 10").expect("resolves"),
        json!("50% of 10")
    );
}

#[test]
fn test_missing_parameter_fails() {
    let bag = bag(&[("a", json!("%b%"))]);
    let mut bag = bag;

    match bag.resolve() {
        Err(Error::ParameterNotFound {
            name,
            referenced_by,
        }) => {
            assert_eq!(name, "b");
            assert_eq!(referenced_by.as_deref(), Some("a"));
        }
        other => panic!("Expected ParameterNotFound, got {other:?}"),
    }
}

#[test]
fn test_circular_parameters_fail() {
    let mut bag = bag(&[("a", json!("%b%")), ("b", json!("x-%a%"))]);

    match bag.resolve() {
        Err(Error::ParameterCircularReference { path }) => {
            assert_eq!(path, vec!["a", "b", "a"]);
        }
        other => panic!("Expected ParameterCircularReference, got {other:?}"),
    }
}

#[test]
fn test_resolve_chains_and_nested_values() {
    let mut bag = bag(&[
        ("root", json!("/srv")),
        ("cache", json!("%root%/cache")),
        ("paths", json!({"cache": "%cache%", "list": ["%root%", 1]})),
    ]);

    bag.resolve().expect("resolves");

    assert!(bag.is_resolved());
    assert_eq!(bag.get("cache"), Some(&json!("/srv/cache")));
    assert_eq!(
        bag.get("paths"),
        Some(&json!({"cache": "/srv/cache", "list": ["/srv", 1]}))
    );
}

#[test]
fn test_array_cannot_be_interpolated() {
    let bag = bag(&[("list", json!([1, 2]))]);
    let result = bag.resolve_string("items: %list%");
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_add_overrides_existing_values() {
    let mut bag = bag(&[("a", json!(1)), ("b", json!(2))]);

    let mut incoming = IndexMap::new();
    incoming.insert("b".to_string(), json!(20));
    incoming.insert("c".to_string(), json!(30));
    bag.add(incoming);

    assert_eq!(bag.get("b"), Some(&json!(20)));
    assert_eq!(bag.get("c"), Some(&json!(30)));
    let names: Vec<&String> = bag.all().keys().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_resolved_bag_does_not_reresolve() {
    let mut map = IndexMap::new();
    map.insert("literal".to_string(), json!("50%"));
    map.insert("escaped".to_string(), json!("%literal%"));
    let bag = ParameterBag::resolved_from_map(map);

    assert_eq!(bag.resolve_string("%escaped%").expect("resolves"), json!("%literal%"));
}
