//! Flattening of raw differences into labelled field-level change records

use crate::compare::{join_path, ArrayItem, DeepCompare, DeepDiffComparer, RawDifference};
use crate::error::{AuditDiffError, Result};
use crate::label::resolve_label;
use crate::options::{DiffOptions, FieldNames};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Display operation of a change record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Created,
    Deleted,
    Edited,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Created => "Created",
            Operation::Deleted => "Deleted",
            Operation::Edited => "Edited",
        }
    }

    /// Array membership changes report the element-level kind
    pub fn of(difference: &RawDifference) -> Self {
        match difference {
            RawDifference::Created { .. } => Operation::Created,
            RawDifference::Deleted { .. } => Operation::Deleted,
            RawDifference::Edited { .. } => Operation::Edited,
            RawDifference::Array { item, .. } => match item {
                ArrayItem::Created { .. } => Operation::Created,
                ArrayItem::Deleted { .. } => Operation::Deleted,
            },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One labelled field-level change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: String,
    /// Previous value, `""` when absent
    pub from: Value,
    /// New value, `""` when absent
    pub to: Value,
    pub operation: Operation,
    pub label: String,
}

impl ChangeRecord {
    /// Render with the configured output keys
    pub fn to_view(&self, names: &FieldNames) -> Map<String, Value> {
        let mut view = Map::new();
        view.insert(names.to.clone(), self.to.clone());
        view.insert(names.from.clone(), self.from.clone());
        view.insert(names.path.clone(), Value::String(self.path.clone()));
        view.insert(
            names.operation.clone(),
            Value::String(self.operation.as_str().to_string()),
        );
        view.insert(names.label.clone(), Value::String(self.label.clone()));
        view
    }
}

/// Which side of a record a nested payload belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    To,
    From,
}

/// A changed value, classified once
enum Payload<'a> {
    Scalar(&'a Value),
    Nested(Vec<(String, &'a Value)>),
}

impl<'a> Payload<'a> {
    fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(fields) => {
                Payload::Nested(fields.iter().map(|(k, v)| (k.clone(), v)).collect())
            }
            Value::Array(items) => Payload::Nested(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
            ),
            scalar => Payload::Scalar(scalar),
        }
    }
}

fn absent() -> Value {
    Value::String(String::new())
}

/// Walks raw differences, appending change records to a caller-owned list
struct Flattener<'a> {
    schema: &'a Schema,
    max_depth: usize,
}

impl<'a> Flattener<'a> {
    fn add_difference(
        &self,
        difference: &RawDifference,
        changes: &mut Vec<ChangeRecord>,
    ) -> Result<()> {
        let path = join_path(difference.path());
        let operation = Operation::of(difference);
        let empty = absent();
        let to = difference.rhs().unwrap_or(&empty);
        let from = difference.lhs().unwrap_or(&empty);

        if let Payload::Nested(fields) = Payload::classify(to) {
            return self.add_nested(&path, fields, operation, Side::To, 1, changes);
        }
        if let Payload::Nested(fields) = Payload::classify(from) {
            return self.add_nested(&path, fields, operation, Side::From, 1, changes);
        }

        changes.push(ChangeRecord {
            label: resolve_label(&path, self.schema),
            path,
            from: from.clone(),
            to: to.clone(),
            operation,
        });
        Ok(())
    }

    fn add_nested(
        &self,
        base: &str,
        fields: Vec<(String, &Value)>,
        operation: Operation,
        side: Side,
        depth: usize,
        changes: &mut Vec<ChangeRecord>,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(AuditDiffError::cyclic_input(self.max_depth));
        }

        for (field, value) in fields {
            let path = format!("{}.{}", base, field);

            match Payload::classify(value) {
                Payload::Nested(nested) => {
                    self.add_nested(&path, nested, operation, side, depth + 1, changes)?
                }
                Payload::Scalar(scalar) => {
                    let (from, to) = match side {
                        Side::To => (absent(), scalar.clone()),
                        Side::From => (scalar.clone(), absent()),
                    };
                    changes.push(ChangeRecord {
                        label: resolve_label(&path, self.schema),
                        path,
                        from,
                        to,
                        operation,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Labelled change list between `old` and `current`
pub fn get_diff(
    old: &Value,
    current: &Value,
    schema: &Schema,
    options: &DiffOptions,
) -> Result<Vec<ChangeRecord>> {
    let comparer = DeepDiffComparer::new(options.max_depth);
    get_diff_with(&comparer, old, current, schema, options)
}

/// Same as [`get_diff`] with a caller-supplied comparer
pub fn get_diff_with<C: DeepCompare + ?Sized>(
    comparer: &C,
    old: &Value,
    current: &Value,
    schema: &Schema,
    options: &DiffOptions,
) -> Result<Vec<ChangeRecord>> {
    let old = options.strip_omitted(old);
    let current = options.strip_omitted(current);

    let differences = comparer.compare(&old, &current)?;
    let flattener = Flattener {
        schema,
        max_depth: options.max_depth,
    };

    let mut changes = Vec::with_capacity(differences.len());
    for difference in &differences {
        flattener.add_difference(difference, &mut changes)?;
    }

    log::debug!(
        "Normalized {} raw differences into {} change records",
        differences.len(),
        changes.len()
    );
    Ok(changes)
}

/// Change list rendered with the keys configured in `options.change_transform`
pub fn get_diff_view(
    old: &Value,
    current: &Value,
    schema: &Schema,
    options: &DiffOptions,
) -> Result<Vec<Map<String, Value>>> {
    let names = FieldNames::resolve(&options.change_transform)?;
    let changes = get_diff(old, current, schema, options)?;
    Ok(changes.iter().map(|change| change.to_view(&names)).collect())
}

/// Reusable differ holding a schema, options and comparer.
///
/// Output key renames are validated once at construction. Each call builds
/// its own change list, so one helper can serve many comparisons.
#[derive(Debug, Clone)]
pub struct DiffHelper<C = DeepDiffComparer> {
    schema: Schema,
    options: DiffOptions,
    names: FieldNames,
    comparer: C,
}

impl DiffHelper<DeepDiffComparer> {
    pub fn new(schema: Schema, options: DiffOptions) -> Result<Self> {
        let comparer = DeepDiffComparer::new(options.max_depth);
        Self::with_comparer(schema, options, comparer)
    }
}

impl<C: DeepCompare> DiffHelper<C> {
    pub fn with_comparer(schema: Schema, options: DiffOptions, comparer: C) -> Result<Self> {
        let names = FieldNames::resolve(&options.change_transform)?;
        Ok(Self {
            schema,
            options,
            names,
            comparer,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn field_names(&self) -> &FieldNames {
        &self.names
    }

    pub fn diff(&self, old: &Value, current: &Value) -> Result<Vec<ChangeRecord>> {
        get_diff_with(&self.comparer, old, current, &self.schema, &self.options)
    }

    pub fn diff_view(&self, old: &Value, current: &Value) -> Result<Vec<Map<String, Value>>> {
        Ok(self
            .diff(old, current)?
            .iter()
            .map(|change| change.to_view(&self.names))
            .collect())
    }

    pub fn label(&self, path: &str) -> String {
        resolve_label(path, &self.schema)
    }
}
