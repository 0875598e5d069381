//! # auditdiff
//! 
//! Field-level change logs between two versions of a nested record. Raw
//! structural differences are flattened into labelled `{path, from, to,
//! operation, label}` records suitable for audit trails, and a separate
//! changed-subtree diff reports what the current version added or edited.

pub mod cli;
pub mod error;
pub mod compare;
pub mod schema;
pub mod label;
pub mod options;
pub mod normalizer;
pub mod structural;
pub mod commands;
pub mod output;

pub use error::{Result, AuditDiffError};
pub use compare::{ArrayItem, DeepCompare, DeepDiffComparer, PathSegment, RawDifference};
pub use schema::{PathMeta, PathOptions, Schema};
pub use label::resolve_label;
pub use options::{ChangeTransform, DiffOptions, FieldNames};
pub use normalizer::{get_diff, get_diff_view, get_diff_with, ChangeRecord, DiffHelper, Operation};
pub use structural::{deep_diff, deep_diff_with_limit};

/// Top-level fields always stripped before comparison
pub const DEFAULT_OMIT_PATHS: &[&str] = &["_id"];

/// Default recursion limit for comparison and flattening
pub const DEFAULT_MAX_DEPTH: usize = 128;
