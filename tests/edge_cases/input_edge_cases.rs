//! Edge case tests for unusual inputs

use crate::common::CliTestRunner;
use auditdiff::{
    deep_diff, get_diff, get_diff_with, AuditDiffError, DeepCompare, DeepDiffComparer,
    DiffOptions, Operation, RawDifference, Result, Schema,
};
use serde_json::{json, Value};

fn diff(old: Value, current: Value) -> Vec<auditdiff::ChangeRecord> {
    get_diff(&old, &current, &Schema::new(), &DiffOptions::default()).unwrap()
}

#[test]
fn test_non_object_inputs_are_empty_records() {
    assert!(diff(json!(null), json!("text")).is_empty());
    assert!(diff(json!([1, 2]), json!(42)).is_empty());
    assert_eq!(diff(json!(null), json!({"a": 1})).len(), 1);
}

#[test]
fn test_null_values_are_scalars() {
    let changes = diff(json!({"nickname": "jo"}), json!({"nickname": null}));
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].to, Value::Null);
    assert_eq!(changes[0].operation, Operation::Edited);
}

#[test]
fn test_empty_nested_payload_emits_nothing() {
    assert!(diff(json!({}), json!({"meta": {}})).is_empty());
    assert!(diff(json!({"list": []}), json!({})).is_empty());
}

#[test]
fn test_scalar_replaced_by_record() {
    let changes = diff(json!({"geo": "unknown"}), json!({"geo": {"lat": 1.5}}));
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].path, "geo.lat");
    assert_eq!(changes[0].from, json!(""));
    assert_eq!(changes[0].to, json!(1.5));
    assert_eq!(changes[0].operation, Operation::Edited);
}

#[test]
fn test_unicode_keys_and_values() {
    let changes = diff(json!({"café": "☕"}), json!({"café": "🍵"}));
    assert_eq!(changes[0].path, "café");
    assert_eq!(changes[0].label, "Café");
}

#[test]
fn test_dotted_keys_are_kept_opaque() {
    let changes = diff(json!({"a.b": 1}), json!({"a.b": 2}));
    assert_eq!(changes[0].path, "a.b");
    assert_eq!(changes[0].label, "B");
}

#[test]
fn test_literal_dotted_key_can_be_omitted() {
    let options = DiffOptions::default().omit("meta.v");
    let changes = get_diff(
        &json!({"meta.v": 1}),
        &json!({"meta.v": 2}),
        &Schema::new(),
        &options,
    )
    .unwrap();
    assert!(changes.is_empty());
}

#[test]
fn test_cyclic_like_depth_is_reported() {
    let mut nested = json!("leaf");
    for _ in 0..50 {
        nested = json!({ "child": nested });
    }
    let options = DiffOptions::default().with_max_depth(10);

    let err = get_diff(&json!({}), &json!({"root": nested}), &Schema::new(), &options).unwrap_err();
    assert!(matches!(err, AuditDiffError::CyclicInput { depth: 10 }));
}

struct FailingComparer;

impl DeepCompare for FailingComparer {
    fn compare(&self, _lhs: &Value, _rhs: &Value) -> Result<Vec<RawDifference>> {
        Err(AuditDiffError::invalid_input("comparer unavailable"))
    }
}

#[test]
fn test_comparer_errors_propagate() {
    let err = get_diff_with(
        &FailingComparer,
        &json!({}),
        &json!({}),
        &Schema::new(),
        &DiffOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AuditDiffError::InvalidInput { .. }));
}

#[test]
fn test_dyn_comparer() {
    let comparer: Box<dyn DeepCompare> = Box::new(DeepDiffComparer::default());
    let changes = get_diff_with(
        comparer.as_ref(),
        &json!({"a": 1}),
        &json!({"a": 2}),
        &Schema::new(),
        &DiffOptions::default(),
    )
    .unwrap();
    assert_eq!(changes.len(), 1);
}

#[test]
fn test_deep_diff_ignores_omission_rules() {
    // the changed-subtree diff has no omit list; identity fields show up
    assert_eq!(
        deep_diff(&json!({"_id": 1}), &json!({"_id": 2})).unwrap(),
        json!({"_id": 2})
    );
}

#[test]
fn test_malformed_json_input_file() {
    let runner = CliTestRunner::new().unwrap();
    let bad = runner.fixture().create_raw("bad.json", "{ not json").unwrap();
    let good = runner.fixture().create_json("good.json", &json!({})).unwrap();

    let err = runner.expect_failure(&["diff", bad.to_str().unwrap(), good.to_str().unwrap()]);
    assert!(matches!(err, AuditDiffError::Json(_)));
}
