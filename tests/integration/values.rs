//! Values resolution through the public library API.

use serde_json::json;
use std::path::Path;
use txtplate::core::TxtplateError;
use txtplate::test_utils::{TestProject, init_test_logging};
use txtplate::values::{ValueTree, ValuesFile, ValuesFormat, ValuesResolver, resolve_values};

fn to_json(tree: &ValueTree) -> serde_json::Value {
    serde_json::to_value(tree).unwrap()
}

#[test]
fn test_three_file_precedence() {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    let defaults = project
        .create_file(
            "defaults.yaml",
            "image:\n  repository: app\n  tag: latest\nreplicas: 1\nenv: [A, B]\n",
        )
        .unwrap();
    let staging = project
        .create_file("staging.json", r#"{"image": {"tag": "1.2.0"}, "env": ["C"]}"#)
        .unwrap();
    let local = project.create_file("local.yml", "replicas: 2\nimage:\n  pullPolicy: Never\n").unwrap();

    let tree = resolve_values(&[defaults, staging, local]).unwrap();
    assert_eq!(
        to_json(&tree),
        json!({
            "image": {"repository": "app", "tag": "1.2.0", "pullPolicy": "Never"},
            "replicas": 2,
            "env": ["C"],
        })
    );
}

#[test]
fn test_key_order_follows_first_appearance() {
    let project = TestProject::new().unwrap();
    let a = project.create_file("a.json", r#"{"zeta": 1, "alpha": 2}"#).unwrap();
    let b = project.create_file("b.json", r#"{"middle": 3, "zeta": 4}"#).unwrap();

    let tree = resolve_values(&[a, b]).unwrap();
    let keys: Vec<&str> = tree.as_mapping().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "middle"]);
}

#[test]
fn test_numeric_yaml_keys_become_strings() {
    let project = TestProject::new().unwrap();
    let ports = project.create_file("ports.yaml", "ports:\n  80: http\n  443: https\n").unwrap();
    let overlay = project.create_file("overlay.json", r#"{"ports": {"80": "redirect"}}"#).unwrap();

    let tree = resolve_values(&[ports, overlay]).unwrap();
    assert_eq!(tree.pointer("/ports/80").and_then(ValueTree::as_str), Some("redirect"));
    assert_eq!(tree.pointer("/ports/443").and_then(ValueTree::as_str), Some("https"));
}

#[test]
fn test_nested_non_string_key_reports_file() {
    let project = TestProject::new().unwrap();
    let good = project.create_file("good.json", r#"{"a": 1}"#).unwrap();
    let bad = project.create_file("bad.yaml", "outer:\n  inner:\n    null: x\n").unwrap();

    let err = resolve_values(&[&good, &bad]).unwrap_err();
    assert!(matches!(err, TxtplateError::KeyNotString { .. }));
    assert_eq!(err.values_path(), Some(bad.as_path()));
}

#[test]
fn test_resolver_incremental() {
    let project = TestProject::new().unwrap();
    let base = project.create_file("base.yaml", "a: {b: 1, c: 2}\n").unwrap();

    let mut resolver = ValuesResolver::new();
    resolver.merge_file(&ValuesFile::new(&base)).unwrap();
    resolver.merge_bytes(Path::new("inline.json"), br#"{"a": {"c": 3}}"#).unwrap();
    assert_eq!(resolver.merged(), 2);

    assert_eq!(to_json(&resolver.finish()), json!({"a": {"b": 1, "c": 3}}));
}

#[test]
fn test_format_inference() {
    assert_eq!(ValuesFormat::from_path(Path::new("x.yaml")), ValuesFormat::Yaml);
    assert_eq!(ValuesFormat::from_path(Path::new("x.yml")), ValuesFormat::Yaml);
    assert_eq!(ValuesFormat::from_path(Path::new("x.json")), ValuesFormat::Json);
    assert_eq!(ValuesFormat::from_path(Path::new("x.txt")), ValuesFormat::Json);
    assert_eq!(ValuesFormat::from_path(Path::new("x.Yml")), ValuesFormat::Json);
}

#[test]
fn test_yaml_anchors_and_merge_keys_then_overlay() {
    let project = TestProject::new().unwrap();
    let base = project
        .create_file(
            "base.yaml",
            "defaults: &defaults\n  host: db\n  port: 5432\nprimary:\n  <<: *defaults\n  host: primary\nreplica: *defaults\n",
        )
        .unwrap();
    let overlay = project.create_file("overlay.json", r#"{"replica": {"port": 6432}}"#).unwrap();

    let tree = resolve_values(&[base, overlay]).unwrap();
    assert_eq!(to_json(&tree)["primary"], json!({"host": "primary", "port": 5432}));
    assert_eq!(to_json(&tree)["replica"], json!({"host": "db", "port": 6432}));
}

#[test]
fn test_colliding_keys_after_normalization_fail() {
    let project = TestProject::new().unwrap();
    let bad = project.create_file("ports.yaml", "80: http\n\"80\": web\n").unwrap();

    let err = resolve_values(&[&bad]).unwrap_err();
    assert!(matches!(err, TxtplateError::Decode { .. }));
    assert_eq!(err.values_path(), Some(bad.as_path()));
}
