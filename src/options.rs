//! Diff options: omitted paths, output key renaming and recursion limits

use crate::error::{AuditDiffError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Options accepted by the change-list entry points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    /// Dotted paths removed from both records before comparison
    #[serde(default)]
    pub omit_paths: Vec<String>,

    #[serde(default)]
    pub change_transform: ChangeTransform,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    crate::DEFAULT_MAX_DEPTH
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            omit_paths: Vec::new(),
            change_transform: ChangeTransform::default(),
            max_depth: default_max_depth(),
        }
    }
}

impl DiffOptions {
    /// Load options from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn omit(mut self, path: impl Into<String>) -> Self {
        self.omit_paths.push(path.into());
        self
    }

    pub fn with_change_transform(mut self, transform: ChangeTransform) -> Self {
        self.change_transform = transform;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Caller paths followed by the always-omitted defaults
    pub fn omitted_paths(&self) -> impl Iterator<Item = &str> {
        self.omit_paths
            .iter()
            .map(String::as_str)
            .chain(crate::DEFAULT_OMIT_PATHS.iter().copied())
    }

    /// Copy of `record` without the omitted paths; non-object input becomes
    /// an empty record
    pub fn strip_omitted(&self, record: &Value) -> Value {
        let mut fields = match record {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };

        for path in self.omitted_paths() {
            // a key that literally contains dots wins over the nested walk
            if fields.shift_remove(path).is_some() {
                continue;
            }
            let segments: Vec<&str> = path.split('.').collect();
            remove_path(&mut fields, &segments);
        }

        Value::Object(fields)
    }
}

fn remove_path(fields: &mut Map<String, Value>, segments: &[&str]) {
    match segments {
        [] => {}
        [last] => {
            fields.shift_remove(*last);
        }
        [head, rest @ ..] => {
            if let Some(Value::Object(nested)) = fields.get_mut(*head) {
                remove_path(nested, rest);
            }
        }
    }
}

/// Optional renames for the keys of rendered change records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ops: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Resolved output keys for rendered change records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub to: String,
    pub from: String,
    pub path: String,
    pub operation: String,
    pub label: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            to: "to".to_string(),
            from: "from".to_string(),
            path: "path".to_string(),
            operation: "operation".to_string(),
            label: "label".to_string(),
        }
    }
}

impl FieldNames {
    /// Apply `transform` over the canonical names. Blank overrides and two
    /// fields sharing one key are rejected.
    pub fn resolve(transform: &ChangeTransform) -> Result<Self> {
        let defaults = Self::default();
        let pick = |field: &str, rename: &Option<String>, default: String| -> Result<String> {
            match rename {
                Some(name) if name.trim().is_empty() => Err(AuditDiffError::config(format!(
                    "changeTransform.{} must not be empty",
                    field
                ))),
                Some(name) => Ok(name.clone()),
                None => Ok(default),
            }
        };

        let names = Self {
            to: pick("to", &transform.to, defaults.to)?,
            from: pick("from", &transform.from, defaults.from)?,
            path: pick("path", &transform.path, defaults.path)?,
            operation: pick("ops", &transform.ops, defaults.operation)?,
            label: pick("label", &transform.label, defaults.label)?,
        };

        let keys = names.keys();
        for (i, key) in keys.iter().enumerate() {
            if keys[..i].contains(key) {
                return Err(AuditDiffError::config(format!(
                    "changeTransform maps two fields to the same key '{}'",
                    key
                )));
            }
        }

        Ok(names)
    }

    /// Keys in output order
    pub fn keys(&self) -> [&str; 5] {
        [
            self.to.as_str(),
            self.from.as_str(),
            self.path.as_str(),
            self.operation.as_str(),
            self.label.as_str(),
        ]
    }
}
