//! Integration tests for custom types and recursive schemas.

use patchwarden::{RootValidator, SchemaCompiler};
use serde_json::{json, Value};

fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

fn tree_schema() -> Value {
    json!({
        "type": "node",
        "customTypes": {
            "node": {
                "type": "object",
                "fields": {
                    "label": {"type": "string", "required": true},
                    "children": {
                        "type": "array",
                        "elements": {"type": "node"}
                    }
                }
            }
        }
    })
}

fn nested(depth: usize) -> Value {
    let mut value = json!({"label": "leaf"});
    for level in 0..depth {
        value = json!({"label": format!("level {}", level), "children": [value]});
    }
    value
}

#[test]
fn test_self_referential_type() {
    let validator = RootValidator::from_value(&tree_schema()).unwrap();

    let tree = json!({
        "label": "root",
        "children": [
            {"label": "a", "children": []},
            {"label": "b", "children": [{"label": "c"}]}
        ]
    });
    assert!(validator.validate_value(&tree).is_success());
}

#[test]
fn test_errors_deep_in_recursive_structure() {
    let validator = RootValidator::from_value(&tree_schema()).unwrap();

    let tree = json!({
        "label": "root",
        "children": [
            {"label": "a", "children": [{"children": []}, {"label": 4}]}
        ]
    });

    let errors = unwrap_failure(validator.validate_value(&tree));
    assert_eq!(
        errors.positions(),
        vec!["$/children/0/children/0", "$/children/0/children/1/label"]
    );
}

#[test]
fn test_deep_nesting_within_limit() {
    let validator = RootValidator::from_value(&tree_schema()).unwrap();
    assert!(validator.validate_value(&nested(100)).is_success());
}

#[test]
fn test_depth_limit_exceeded() {
    let validator = SchemaCompiler::new()
        .with_max_depth(10)
        .compile_value(&tree_schema())
        .unwrap();

    assert!(validator.validate_value(&nested(9)).is_success());

    let errors = unwrap_failure(validator.validate_value(&nested(10)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "max_depth_exceeded");
    assert_eq!(errors.first().message, "maximum custom type depth 10 exceeded");
}

#[test]
fn test_mutually_recursive_types() {
    let validator = RootValidator::from_value(&json!({
        "type": "folder",
        "customTypes": {
            "folder": {
                "type": "object",
                "fields": {
                    "name": {"type": "string", "required": true},
                    "entries": {"type": "array", "elements": {"type": "entry"}}
                }
            },
            "entry": {
                "type": "object",
                "fields": {
                    "file": {"type": "string"},
                    "folder": {"type": "folder"}
                }
            }
        }
    }))
    .unwrap();

    let value = json!({
        "name": "home",
        "entries": [
            {"file": "notes.txt"},
            {"folder": {"name": "docs", "entries": [{"file": 3}]}}
        ]
    });

    let errors = unwrap_failure(validator.validate_value(&value));
    assert_eq!(
        errors.positions(),
        vec!["$/entries/1/folder/entries/0/file"]
    );
}

#[test]
fn test_reference_forwards_requiredness() {
    let validator = RootValidator::from_value(&json!({
        "type": "object",
        "fields": {
            "id": {"type": "identifier"},
            "parent": {"type": "identifier", "required": false}
        },
        "customTypes": {
            "identifier": {"type": "string", "required": true, "regexMatch": "^[a-z0-9]+$"}
        }
    }))
    .unwrap();

    let errors = unwrap_failure(validator.validate_value(&json!({})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "required field 'id' is missing");

    let errors = unwrap_failure(validator.validate_value(&json!({"id": "A!", "parent": "ok"})));
    assert_eq!(errors.first().position.to_string(), "$/id");
    assert_eq!(errors.first().code, "regex_match");

    assert!(validator
        .validate_patches(br#"[{"op": "remove", "path": "/parent"}]"#)
        .is_ok());
    assert!(validator
        .validate_patches(br#"[{"op": "remove", "path": "/id"}]"#)
        .is_err());
}

#[test]
fn test_requiredness_resolved_at_depth_limit() {
    let validator = SchemaCompiler::new()
        .with_max_depth(2)
        .compile_value(&json!({
            "type": "node",
            "customTypes": {
                "node": {
                    "type": "object",
                    "fields": {
                        "id": {"type": "leaf"},
                        "next": {"type": "node"}
                    }
                },
                "leaf": {"type": "string", "required": true}
            }
        }))
        .unwrap();

    let errors = unwrap_failure(validator.validate_value(&json!({"id": "a", "next": {}})));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "required");
    assert_eq!(errors.first().position.to_string(), "$/next");
    assert_eq!(errors.first().message, "required field 'id' is missing");

    let err = validator
        .validate_patches(br#"[{"op": "remove", "path": "/next/id"}]"#)
        .unwrap_err();
    let errors = err.schema_errors().unwrap();
    assert_eq!(errors.first().code, "required_removal");
    assert_eq!(errors.first().position.to_string(), "Patch 0 /next/id");
}

#[test]
fn test_aliases_to_other_types() {
    let validator = RootValidator::from_value(&json!({
        "type": "name",
        "customTypes": {
            "name": {"type": "label"},
            "label": {"type": "string", "maxChars": 3}
        }
    }))
    .unwrap();

    assert!(validator.validate_value(&json!("abc")).is_success());
    assert!(validator.validate_value(&json!("abcd")).is_failure());
}

#[test]
fn test_patch_into_recursive_structure() {
    let validator = RootValidator::from_value(&tree_schema()).unwrap();

    let source = br#"[
        {"op": "add", "path": "/children/0/children/-", "value": {"label": "new"}},
        {"op": "replace", "path": "/children/2/children/0/label", "value": 1},
        {"op": "remove", "path": "/children/0/label"},
        {"op": "add", "path": "/children/0/color", "value": "red"}
    ]"#;

    let err = validator.validate_patches(source).unwrap_err();
    let errors = err.schema_errors().unwrap();
    assert_eq!(
        errors.positions(),
        vec![
            "Patch 1 /children/2/children/0/label",
            "Patch 2 /children/0/label",
            "Patch 3 /children/0",
        ]
    );
}

#[test]
fn test_unused_custom_types_are_still_compiled() {
    let validator = RootValidator::from_value(&json!({
        "type": "float",
        "customTypes": {
            "unused": {"type": "string", "minChars": 1}
        }
    }))
    .unwrap();

    assert!(validator.custom_types().contains("unused"));
    assert!(validator.validate_value(&json!(1)).is_success());
}
