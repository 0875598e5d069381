//! Command implementations for auditdiff CLI

use crate::cli::{Commands, OutputFormat, RenameArgs};
use crate::compare::{DeepCompare, DeepDiffComparer};
use crate::error::{AuditDiffError, Result};
use crate::label::resolve_label;
use crate::normalizer::DiffHelper;
use crate::options::{ChangeTransform, DiffOptions};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::schema::Schema;
use crate::structural::deep_diff;
use serde_json::Value;
use std::path::Path;

/// Execute a command
pub fn execute_command(command: Commands) -> Result<()> {
    match command {
        Commands::Diff {
            old,
            current,
            schema,
            options,
            omit,
            rename,
            max_depth,
            format,
            output,
        } => diff_command(
            &old,
            &current,
            schema.as_deref(),
            options.as_deref(),
            omit,
            rename,
            max_depth,
            &format,
            output.as_deref(),
        ),
        Commands::Deep {
            old,
            current,
            format,
            output,
        } => deep_command(&old, &current, &format, output.as_deref()),
        Commands::Raw { old, current } => raw_command(&old, &current),
        Commands::Label { path, schema } => label_command(&path, schema.as_deref()),
    }
}

/// Produce the labelled change list
#[allow(clippy::too_many_arguments)]
fn diff_command(
    old_path: &Path,
    current_path: &Path,
    schema_path: Option<&Path>,
    options_path: Option<&Path>,
    omit: Vec<String>,
    rename: RenameArgs,
    max_depth: Option<usize>,
    format: &str,
    output_path: Option<&Path>,
) -> Result<()> {
    let output_format = OutputFormat::parse(format)
        .map_err(|e| AuditDiffError::invalid_input(e))?;

    let old = load_record(old_path)?;
    let current = load_record(current_path)?;
    let schema = load_schema(schema_path)?;
    let options = build_options(options_path, omit, rename, max_depth)?;

    let helper = DiffHelper::new(schema, options)?;
    let changes = helper.diff(&old, &current)?;
    log::info!(
        "Found {} changes between {} and {}",
        changes.len(),
        old_path.display(),
        current_path.display()
    );

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_changes(&changes),
        OutputFormat::Json => {
            println!("{}", JsonFormatter::format_changes(&changes, helper.field_names())?)
        }
    }

    if let Some(output_path) = output_path {
        let content = JsonFormatter::format_changes(&changes, helper.field_names())?;
        write_output(output_path, &content)?;
        println!("\n💾 Changes saved to: {}", output_path.display());
    }

    Ok(())
}

/// Show the changed subtree of the current record
fn deep_command(
    old_path: &Path,
    current_path: &Path,
    format: &str,
    output_path: Option<&Path>,
) -> Result<()> {
    let output_format = OutputFormat::parse(format)
        .map_err(|e| AuditDiffError::invalid_input(e))?;

    let old = load_record(old_path)?;
    let current = load_record(current_path)?;
    let subtree = deep_diff(&old, &current)?;

    match output_format {
        OutputFormat::Pretty => PrettyPrinter::print_changed_subtree(&subtree),
        OutputFormat::Json => println!("{}", JsonFormatter::format(&subtree)?),
    }

    if let Some(output_path) = output_path {
        write_output(output_path, &JsonFormatter::format(&subtree)?)?;
        println!("\n💾 Changed subtree saved to: {}", output_path.display());
    }

    Ok(())
}

/// Print raw difference records
fn raw_command(old_path: &Path, current_path: &Path) -> Result<()> {
    let old = load_record(old_path)?;
    let current = load_record(current_path)?;
    let differences = DeepDiffComparer::default().compare(&old, &current)?;
    println!("{}", JsonFormatter::format(&differences)?);
    Ok(())
}

/// Print the resolved label for a path
fn label_command(path: &str, schema_path: Option<&Path>) -> Result<()> {
    let schema = load_schema(schema_path)?;
    println!("{}", resolve_label(path, &schema));
    Ok(())
}

/// Merge the options file with command-line overrides
pub fn build_options(
    options_path: Option<&Path>,
    omit: Vec<String>,
    rename: RenameArgs,
    max_depth: Option<usize>,
) -> Result<DiffOptions> {
    let mut options = match options_path {
        Some(path) => {
            ensure_exists(path)?;
            DiffOptions::from_file(path)?
        }
        None => DiffOptions::default(),
    };

    options.omit_paths.extend(omit);
    options.change_transform = merge_transform(options.change_transform, rename);
    if let Some(max_depth) = max_depth {
        options.max_depth = max_depth;
    }

    Ok(options)
}

fn merge_transform(base: ChangeTransform, rename: RenameArgs) -> ChangeTransform {
    ChangeTransform {
        to: rename.rename_to.or(base.to),
        from: rename.rename_from.or(base.from),
        path: rename.rename_path.or(base.path),
        ops: rename.rename_ops.or(base.ops),
        label: rename.rename_label.or(base.label),
    }
}

/// Load a JSON record from disk
pub fn load_record(path: &Path) -> Result<Value> {
    ensure_exists(path)?;
    let content = std::fs::read_to_string(path)?;
    let record: Value = serde_json::from_str(&content)?;
    if !record.is_object() && !record.is_null() {
        log::warn!(
            "{} is not a JSON object; treating it as an empty record",
            path.display()
        );
    }
    Ok(record)
}

fn load_schema(schema_path: Option<&Path>) -> Result<Schema> {
    match schema_path {
        Some(path) => {
            ensure_exists(path)?;
            Schema::from_file(path)
        }
        None => Ok(Schema::default()),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuditDiffError::InvalidInputFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn write_output(output_path: &Path, content: &str) -> Result<()> {
    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(output_path, content)?;
    Ok(())
}
