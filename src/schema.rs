//! Schema description used to look up display labels for field paths

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read-only path dictionary with three independent lookup tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub paths: IndexMap<String, PathMeta>,
    #[serde(default)]
    pub single_nested_paths: IndexMap<String, PathMeta>,
    #[serde(default)]
    pub subpaths: IndexMap<String, PathMeta>,
}

/// Metadata attached to one schema path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathMeta {
    #[serde(default)]
    pub options: PathOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathOptions {
    /// Custom display label
    #[serde(rename = "_label_", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Everything else the schema carries for this path
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl PathMeta {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            options: PathOptions {
                label: Some(label.into()),
                extra: IndexMap::new(),
            },
        }
    }

    fn label(&self) -> Option<&str> {
        self.options.label.as_deref().filter(|label| !label.is_empty())
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a schema description from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let schema: Schema = serde_json::from_str(&content)?;
        log::debug!(
            "Loaded schema from {} ({} paths, {} single nested, {} subpaths)",
            path.display(),
            schema.paths.len(),
            schema.single_nested_paths.len(),
            schema.subpaths.len()
        );
        Ok(schema)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.single_nested_paths.is_empty() && self.subpaths.is_empty()
    }

    pub fn with_path_label(mut self, path: impl Into<String>, label: impl Into<String>) -> Self {
        self.paths.insert(path.into(), PathMeta::labelled(label));
        self
    }

    pub fn with_single_nested_label(
        mut self,
        path: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.single_nested_paths.insert(path.into(), PathMeta::labelled(label));
        self
    }

    pub fn with_subpath_label(mut self, path: impl Into<String>, label: impl Into<String>) -> Self {
        self.subpaths.insert(path.into(), PathMeta::labelled(label));
        self
    }

    /// Custom label for a dotted key, probing `paths`, then
    /// `single_nested_paths`, then `subpaths`
    pub fn custom_label(&self, key: &str) -> Option<&str> {
        [&self.paths, &self.single_nested_paths, &self.subpaths]
            .into_iter()
            .find_map(|table| table.get(key).and_then(PathMeta::label))
    }
}
