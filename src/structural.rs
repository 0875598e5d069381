//! Changed-subtree diff between two records
//!
//! Unlike the change-list path, this walks only the keys of the current
//! record, so keys removed since `old` never show up in the result. Callers
//! that need deletions should use [`crate::get_diff`].

use crate::error::{AuditDiffError, Result};
use serde_json::{Map, Value};

/// Keys of `current` whose values changed relative to `old`, with unchanged
/// nested leaves pruned. Uses the default recursion limit.
pub fn deep_diff(old: &Value, current: &Value) -> Result<Value> {
    deep_diff_with_limit(old, current, crate::DEFAULT_MAX_DEPTH)
}

pub fn deep_diff_with_limit(old: &Value, current: &Value, max_depth: usize) -> Result<Value> {
    let empty = Map::new();
    let old_fields = old.as_object().unwrap_or(&empty);
    let current_fields = current.as_object().unwrap_or(&empty);
    let differ = StructuralDiffer { max_depth };
    Ok(Value::Object(differ.changed_subtree(old_fields, current_fields, 0)?))
}

struct StructuralDiffer {
    max_depth: usize,
}

impl StructuralDiffer {
    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(AuditDiffError::cyclic_input(self.max_depth));
        }
        Ok(())
    }

    fn changed_subtree(
        &self,
        old: &Map<String, Value>,
        current: &Map<String, Value>,
        depth: usize,
    ) -> Result<Map<String, Value>> {
        self.check_depth(depth)?;
        let mut result = Map::new();

        for (key, value) in current {
            let previous = old.get(key);
            if let Some(previous) = previous {
                if self.is_match(value, previous, depth + 1)? {
                    continue;
                }
            }

            let changed = self.changed_value(value, previous, depth + 1)?;
            result.insert(key.clone(), changed);
        }

        Ok(result)
    }

    /// Changed elements of `current` by index. Unchanged slots before a
    /// changed one are filled with `null`; trailing unchanged slots are dropped.
    fn changed_elements(
        &self,
        old: &[Value],
        current: &[Value],
        depth: usize,
    ) -> Result<Vec<Value>> {
        self.check_depth(depth)?;
        let mut result = Vec::new();

        for (index, value) in current.iter().enumerate() {
            let previous = old.get(index);
            if let Some(previous) = previous {
                if self.is_match(value, previous, depth + 1)? {
                    continue;
                }
            }

            let changed = self.changed_value(value, previous, depth + 1)?;
            result.resize(index, Value::Null);
            result.push(changed);
        }

        Ok(result)
    }

    fn changed_value(&self, value: &Value, previous: Option<&Value>, depth: usize) -> Result<Value> {
        match (value, previous) {
            (Value::Object(fields), Some(Value::Object(previous_fields))) => {
                Ok(Value::Object(self.changed_subtree(previous_fields, fields, depth)?))
            }
            (Value::Array(items), Some(Value::Array(previous_items))) => {
                Ok(Value::Array(self.changed_elements(previous_items, items, depth)?))
            }
            _ => Ok(value.clone()),
        }
    }

    /// Partial-match equality: `value` matches `source` when it contains
    /// everything `source` has. Objects may carry extra keys; arrays must be at
    /// least as long and hold a distinct match for every source element.
    fn is_match(&self, value: &Value, source: &Value, depth: usize) -> Result<bool> {
        self.check_depth(depth)?;

        match (value, source) {
            (Value::Object(fields), Value::Object(source_fields)) => {
                for (key, source_value) in source_fields {
                    match fields.get(key) {
                        Some(field) if self.is_match(field, source_value, depth + 1)? => {}
                        _ => return Ok(false),
                    }
                }
                Ok(true)
            }
            (Value::Array(items), Value::Array(source_items)) => {
                if items.len() < source_items.len() {
                    return Ok(false);
                }
                let mut used = vec![false; items.len()];
                for source_item in source_items {
                    let mut found = false;
                    for (i, item) in items.iter().enumerate() {
                        if !used[i] && self.is_match(item, source_item, depth + 1)? {
                            used[i] = true;
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(value == source),
        }
    }
}
