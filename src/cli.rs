//! Command-line interface for auditdiff

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "auditdiff")]
#[command(about = "Field-level audit change logs from nested record diffs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Produce the labelled change list between two JSON records
    Diff {
        /// Old version of the record (JSON file)
        old: PathBuf,

        /// Current version of the record (JSON file)
        current: PathBuf,

        /// Schema description used for field labels (JSON file)
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Diff options (JSON file with omitPaths / changeTransform / maxDepth)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Additional path to leave out of the comparison (repeatable)
        #[arg(long = "omit")]
        omit: Vec<String>,

        #[command(flatten)]
        rename: RenameArgs,

        /// Maximum nesting depth before giving up
        #[arg(long, value_parser = validate_max_depth)]
        max_depth: Option<usize>,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Write the JSON change list to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show only the changed subtree of the current record
    Deep {
        /// Old version of the record (JSON file)
        old: PathBuf,

        /// Current version of the record (JSON file)
        current: PathBuf,

        /// Output format: "pretty", "json"
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Write the JSON subtree to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the raw difference records as JSON
    Raw {
        /// Old version of the record (JSON file)
        old: PathBuf,

        /// Current version of the record (JSON file)
        current: PathBuf,
    },

    /// Resolve the display label for a dotted field path
    Label {
        /// Dotted field path, e.g. "items.0.unit_price"
        path: String,

        /// Schema description used for field labels (JSON file)
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

/// Output key overrides for change records
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenameArgs {
    /// Output key for the new value
    #[arg(long)]
    pub rename_to: Option<String>,

    /// Output key for the previous value
    #[arg(long)]
    pub rename_from: Option<String>,

    /// Output key for the field path
    #[arg(long)]
    pub rename_path: Option<String>,

    /// Output key for the operation
    #[arg(long)]
    pub rename_ops: Option<String>,

    /// Output key for the label
    #[arg(long)]
    pub rename_label: Option<String>,
}

/// Parse output format string
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}. Use 'pretty' or 'json'", s)),
        }
    }
}

/// Validate that max depth is greater than 0
fn validate_max_depth(s: &str) -> Result<usize, String> {
    let max_depth: usize = s.parse()
        .map_err(|_| format!("Invalid max depth: '{}'. Must be a positive integer.", s))?;

    if max_depth == 0 {
        return Err("Max depth must be greater than 0".to_string());
    }

    Ok(max_depth)
}
