//! Output formatting utilities

use crate::error::Result;
use crate::normalizer::ChangeRecord;
use crate::options::FieldNames;
use serde_json::{Map, Value};

/// Pretty printer for auditdiff output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print a labelled change list
    pub fn print_changes(changes: &[ChangeRecord]) {
        if changes.is_empty() {
            println!("✅ No changes");
            return;
        }

        println!("📝 Changes: {}", changes.len());
        for (i, change) in changes.iter().enumerate() {
            let is_last = i == changes.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            let detail_prefix = if is_last { "   " } else { "│  " };
            println!("{} {} [{}]", prefix, change.label, change.operation);
            println!("{}├─ Path: {}", detail_prefix, change.path);
            println!(
                "{}└─ {} → {}",
                detail_prefix,
                display_value(&change.from),
                display_value(&change.to)
            );
        }
    }

    /// Print a changed subtree
    pub fn print_changed_subtree(subtree: &Value) {
        match subtree.as_object() {
            Some(fields) if !fields.is_empty() => {
                println!("🔍 Changed fields:");
                Self::print_fields(fields, "");
            }
            _ => println!("✅ No changes"),
        }
    }

    fn print_fields(fields: &Map<String, Value>, prefix: &str) {
        for (i, (key, value)) in fields.iter().enumerate() {
            let is_last = i == fields.len() - 1;
            let marker = if is_last { "└─" } else { "├─" };
            match value.as_object() {
                Some(nested) if !nested.is_empty() => {
                    println!("{}{} {}", prefix, marker, key);
                    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
                    Self::print_fields(nested, &child_prefix);
                }
                _ => println!("{}{} {}: {}", prefix, marker, key, display_value(value)),
            }
        }
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }

    /// Format a change list using the configured output keys
    pub fn format_changes(changes: &[ChangeRecord], names: &FieldNames) -> Result<String> {
        let views: Vec<Map<String, Value>> =
            changes.iter().map(|change| change.to_view(names)).collect();
        Ok(serde_json::to_string_pretty(&views)?)
    }
}

/// Human-readable rendering of a JSON value; empty strings mark an absent side
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "∅".to_string(),
        Value::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}
