//! Changed-subtree diff tests

use crate::common::sample_data;
use auditdiff::{deep_diff, deep_diff_with_limit, AuditDiffError};
use serde_json::json;

#[test]
fn test_customer_changed_subtree() {
    let subtree = deep_diff(&sample_data::customer_v1(), &sample_data::customer_v2()).unwrap();

    assert_eq!(
        subtree,
        json!({
            "_id": "5f1d7c",
            "name": "Jane",
            "address": {"city": "Porto"},
            "orders": [{"qty": 2}],
            "phone": {"mobile": "+351 900 000 000"}
        })
    );
}

#[test]
fn test_grown_array_matches_old_contents() {
    // every old tag is still present, so the tag list counts as unchanged
    let subtree = deep_diff(
        &json!({"tags": ["vip"]}),
        &json!({"tags": ["vip", "newsletter"]}),
    )
    .unwrap();
    assert_eq!(subtree, json!({}));
}

#[test]
fn test_changed_order_line_keeps_its_position() {
    let subtree = deep_diff(
        &json!({"orders": [{"sku": "A1", "qty": 1}, {"sku": "B2", "qty": 4}]}),
        &json!({"orders": [{"sku": "A1", "qty": 1}, {"sku": "B2", "qty": 5}]}),
    )
    .unwrap();
    assert_eq!(subtree, json!({"orders": [null, {"qty": 5}]}));
}

#[test]
fn test_deletions_are_invisible() {
    assert_eq!(
        deep_diff(&json!({"a": 1, "b": 2}), &json!({"a": 1})).unwrap(),
        json!({})
    );
    assert_eq!(
        deep_diff(&json!({"a": {"x": 1, "y": 2}}), &json!({"a": {"x": 1}})).unwrap(),
        json!({"a": {}})
    );
}

#[test]
fn test_scalar_and_nested_subtree() {
    assert_eq!(deep_diff(&json!({"a": 1}), &json!({"a": 2})).unwrap(), json!({"a": 2}));
    assert_eq!(
        deep_diff(&json!({"a": {"x": 1, "y": 2}}), &json!({"a": {"x": 1, "y": 3}})).unwrap(),
        json!({"a": {"y": 3}})
    );
}

#[test]
fn test_deeply_nested_input_is_rejected() {
    let mut old = json!(1);
    let mut current = json!(2);
    for _ in 0..20 {
        old = json!({ "next": old });
        current = json!({ "next": current });
    }

    let err = deep_diff_with_limit(&old, &current, 8).unwrap_err();
    assert!(matches!(err, AuditDiffError::CyclicInput { depth: 8 }));
    assert!(deep_diff_with_limit(&old, &current, 64).is_ok());
}
