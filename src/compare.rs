//! Deep comparison of two JSON records into raw difference records
//!
//! The output shape follows the classic deep-diff record model: every
//! difference carries a `kind` (`N` created, `D` deleted, `E` edited,
//! `A` array membership change) and the path to the changed value. Array
//! membership changes carry the array's own path plus the element index, with
//! the element-level change nested one level down under `item`.

use crate::error::{AuditDiffError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One step of a path into a nested record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(index) => write!(f, "{}", index),
            PathSegment::Key(key) => f.write_str(key),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Join path segments with dots, e.g. `["tags", 0, "name"]` -> `tags.0.name`
pub fn join_path(path: &[PathSegment]) -> String {
    path.iter()
        .map(|segment| segment.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Element-level change inside an array membership change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ArrayItem {
    #[serde(rename = "N")]
    Created { rhs: Value },
    #[serde(rename = "D")]
    Deleted { lhs: Value },
}

/// One unit of change reported by a [`DeepCompare`] implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RawDifference {
    #[serde(rename = "N")]
    Created { path: Vec<PathSegment>, rhs: Value },
    #[serde(rename = "D")]
    Deleted { path: Vec<PathSegment>, lhs: Value },
    #[serde(rename = "E")]
    Edited {
        path: Vec<PathSegment>,
        lhs: Value,
        rhs: Value,
    },
    #[serde(rename = "A")]
    Array {
        path: Vec<PathSegment>,
        index: usize,
        item: ArrayItem,
    },
}

impl RawDifference {
    pub fn path(&self) -> &[PathSegment] {
        match self {
            RawDifference::Created { path, .. }
            | RawDifference::Deleted { path, .. }
            | RawDifference::Edited { path, .. }
            | RawDifference::Array { path, .. } => path,
        }
    }

    /// Single-letter kind tag (`N`, `D`, `E` or `A`)
    pub fn kind(&self) -> char {
        match self {
            RawDifference::Created { .. } => 'N',
            RawDifference::Deleted { .. } => 'D',
            RawDifference::Edited { .. } => 'E',
            RawDifference::Array { .. } => 'A',
        }
    }

    /// Value before the change, looking through array items
    pub fn lhs(&self) -> Option<&Value> {
        match self {
            RawDifference::Deleted { lhs, .. } | RawDifference::Edited { lhs, .. } => Some(lhs),
            RawDifference::Array {
                item: ArrayItem::Deleted { lhs },
                ..
            } => Some(lhs),
            _ => None,
        }
    }

    /// Value after the change, looking through array items
    pub fn rhs(&self) -> Option<&Value> {
        match self {
            RawDifference::Created { rhs, .. } | RawDifference::Edited { rhs, .. } => Some(rhs),
            RawDifference::Array {
                item: ArrayItem::Created { rhs },
                ..
            } => Some(rhs),
            _ => None,
        }
    }
}

/// Source of raw differences between two records
pub trait DeepCompare {
    fn compare(&self, lhs: &Value, rhs: &Value) -> Result<Vec<RawDifference>>;
}

/// Recursive key-wise comparer producing deep-diff style records
#[derive(Debug, Clone)]
pub struct DeepDiffComparer {
    max_depth: usize,
}

impl Default for DeepDiffComparer {
    fn default() -> Self {
        Self {
            max_depth: crate::DEFAULT_MAX_DEPTH,
        }
    }
}

impl DeepDiffComparer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn walk(
        &self,
        lhs: &Value,
        rhs: &Value,
        path: &mut Vec<PathSegment>,
        out: &mut Vec<RawDifference>,
    ) -> Result<()> {
        if path.len() > self.max_depth {
            return Err(AuditDiffError::cyclic_input(self.max_depth));
        }

        match (lhs, rhs) {
            (Value::Object(left), Value::Object(right)) => self.walk_object(left, right, path, out),
            (Value::Array(left), Value::Array(right)) => self.walk_array(left, right, path, out),
            _ if lhs != rhs => {
                out.push(RawDifference::Edited {
                    path: path.clone(),
                    lhs: lhs.clone(),
                    rhs: rhs.clone(),
                });
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn walk_object(
        &self,
        left: &Map<String, Value>,
        right: &Map<String, Value>,
        path: &mut Vec<PathSegment>,
        out: &mut Vec<RawDifference>,
    ) -> Result<()> {
        for (key, left_value) in left {
            path.push(PathSegment::Key(key.clone()));
            match right.get(key) {
                Some(right_value) => self.walk(left_value, right_value, path, out)?,
                None => out.push(RawDifference::Deleted {
                    path: path.clone(),
                    lhs: left_value.clone(),
                }),
            }
            path.pop();
        }

        for (key, right_value) in right.iter().filter(|(key, _)| !left.contains_key(*key)) {
            let mut created_path = path.clone();
            created_path.push(PathSegment::Key(key.clone()));
            out.push(RawDifference::Created {
                path: created_path,
                rhs: right_value.clone(),
            });
        }

        Ok(())
    }

    fn walk_array(
        &self,
        left: &[Value],
        right: &[Value],
        path: &mut Vec<PathSegment>,
        out: &mut Vec<RawDifference>,
    ) -> Result<()> {
        for (index, left_value) in left.iter().enumerate() {
            match right.get(index) {
                Some(right_value) => {
                    path.push(PathSegment::Index(index));
                    self.walk(left_value, right_value, path, out)?;
                    path.pop();
                }
                None => out.push(RawDifference::Array {
                    path: path.clone(),
                    index,
                    item: ArrayItem::Deleted {
                        lhs: left_value.clone(),
                    },
                }),
            }
        }

        for (index, right_value) in right.iter().enumerate().skip(left.len()) {
            out.push(RawDifference::Array {
                path: path.clone(),
                index,
                item: ArrayItem::Created {
                    rhs: right_value.clone(),
                },
            });
        }

        Ok(())
    }
}

impl DeepCompare for DeepDiffComparer {
    fn compare(&self, lhs: &Value, rhs: &Value) -> Result<Vec<RawDifference>> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.walk(lhs, rhs, &mut path, &mut out)?;
        log::debug!("Deep compare produced {} raw differences", out.len());
        Ok(out)
    }
}
