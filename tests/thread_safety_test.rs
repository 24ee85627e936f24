//! Tests for concurrent use of a compiled validator.

use patchwarden::{Patch, RootValidator};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn user_schema() -> RootValidator {
    RootValidator::from_value(&json!({
        "type": "object",
        "fields": {
            "name": {"type": "string", "required": true, "maxChars": 10},
            "friends": {"type": "array", "elements": {"type": "user"}}
        },
        "customTypes": {
            "user": {
                "type": "object",
                "fields": {
                    "name": {"type": "string", "required": true, "maxChars": 10}
                }
            }
        }
    }))
    .unwrap()
}

#[test]
fn test_concurrent_validation() {
    let validator = Arc::new(user_schema());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let result = validator.validate_value(&json!({
                    "name": format!("User{}", i),
                    "friends": [{"name": "Andrea"}]
                }));
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_identical() {
    let validator = Arc::new(user_schema());
    let document = json!({
        "name": "a name that is too long",
        "friends": [{"name": 1}, {}, {"nick": "x"}]
    });

    let expected = validator
        .validate_value(&document)
        .into_result()
        .unwrap_err();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let validator = Arc::clone(&validator);
            let document = document.clone();
            thread::spawn(move || validator.validate_value(&document).into_result().unwrap_err())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_patch_lists() {
    let validator = Arc::new(user_schema());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let patches: Vec<Patch> = (0..50)
                    .map(|i| {
                        let value = if (i + t) % 5 == 0 { json!(42) } else { json!("ok") };
                        Patch::new("replace", format!("/friends/{}/name", i), Some(value))
                    })
                    .collect();

                let errors = validator
                    .validate_patch_list(&patches)
                    .into_result()
                    .unwrap_err();
                assert_eq!(errors.len(), 10);

                let indices: Vec<usize> = (0..50).filter(|i| (i + t) % 5 == 0).collect();
                let expected: Vec<String> = indices
                    .iter()
                    .map(|i| format!("Patch {} /friends/{}/name", i, i))
                    .collect();
                assert_eq!(errors.positions(), expected);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_validator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RootValidator>();
    assert_send_sync::<Arc<RootValidator>>();
}
