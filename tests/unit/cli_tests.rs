//! Unit tests for CLI argument parsing and validation

use auditdiff::cli::{Cli, Commands, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_cli_diff_command_defaults() {
    let cli = Cli::try_parse_from(&["auditdiff", "diff", "old.json", "new.json"]).unwrap();
    match cli.command {
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
        } => {
            assert_eq!(old, PathBuf::from("old.json"));
            assert_eq!(current, PathBuf::from("new.json"));
            assert!(schema.is_none());
            assert!(options.is_none());
            assert!(omit.is_empty());
            assert!(rename.rename_to.is_none());
            assert!(max_depth.is_none());
            assert_eq!(format, "pretty");
            assert!(output.is_none());
        }
        _ => panic!("Expected Diff command"),
    }
}

#[test]
fn test_cli_diff_command_with_options() {
    let cli = Cli::try_parse_from(&[
        "auditdiff", "diff", "old.json", "new.json",
        "--schema", "schema.json",
        "--omit", "updatedAt",
        "--omit", "meta.version",
        "--rename-to", "newValue",
        "--rename-ops", "kind",
        "--max-depth", "32",
        "--format", "json",
    ]).unwrap();

    match cli.command {
        Commands::Diff { schema, omit, rename, max_depth, format, .. } => {
            assert_eq!(schema, Some(PathBuf::from("schema.json")));
            assert_eq!(omit, vec!["updatedAt", "meta.version"]);
            assert_eq!(rename.rename_to.as_deref(), Some("newValue"));
            assert_eq!(rename.rename_ops.as_deref(), Some("kind"));
            assert!(rename.rename_label.is_none());
            assert_eq!(max_depth, Some(32));
            assert_eq!(format, "json");
        }
        _ => panic!("Expected Diff command"),
    }
}

#[test]
fn test_cli_rejects_zero_max_depth() {
    let result = Cli::try_parse_from(&[
        "auditdiff", "diff", "old.json", "new.json", "--max-depth", "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_deep_and_raw_commands() {
    let cli = Cli::try_parse_from(&["auditdiff", "deep", "a.json", "b.json", "--format", "json"]).unwrap();
    assert!(matches!(cli.command, Commands::Deep { ref format, .. } if format == "json"));

    let cli = Cli::try_parse_from(&["auditdiff", "raw", "a.json", "b.json"]).unwrap();
    assert!(matches!(cli.command, Commands::Raw { .. }));
}

#[test]
fn test_cli_label_command() {
    let cli = Cli::try_parse_from(&["auditdiff", "label", "items.0.unit_price"]).unwrap();
    match cli.command {
        Commands::Label { path, schema } => {
            assert_eq!(path, "items.0.unit_price");
            assert!(schema.is_none());
        }
        _ => panic!("Expected Label command"),
    }
}

#[test]
fn test_cli_verbose_flag_is_global() {
    let cli = Cli::try_parse_from(&["auditdiff", "label", "name", "--verbose"]).unwrap();
    assert!(cli.verbose);
}

#[test]
fn test_cli_missing_arguments() {
    assert!(Cli::try_parse_from(&["auditdiff", "diff", "old.json"]).is_err());
    assert!(Cli::try_parse_from(&["auditdiff"]).is_err());
}

#[test]
fn test_output_format_parse() {
    assert!(matches!(OutputFormat::parse("pretty"), Ok(OutputFormat::Pretty)));
    assert!(matches!(OutputFormat::parse("json"), Ok(OutputFormat::Json)));
    assert!(OutputFormat::parse("yaml").is_err());
}
