use std::fs;

use clap::Parser;
use confstrap::error::{CliError, ConfigOrigin};
use confstrap::tooling::cli::{Cli, Commands};
use tempfile::TempDir;

use crate::integration::support::{cli_in, current_dir, legacy_dir, write_file};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["confstrap", "init"],
        vec!["confstrap", "load"],
        vec!["confstrap", "load", "--config", "~/custom.yml"],
        vec!["confstrap", "paths"],
        vec!["confstrap", "paths", "--format", "json"],
        vec!["confstrap", "--log-level", "debug", "init"],
        vec!["confstrap", "init", "--settings", "/tmp/confstrap.toml"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_paths_format() {
    assert!(Cli::try_parse_from(["confstrap", "paths", "--format", "xml"]).is_err());
    assert!(Cli::try_parse_from(["confstrap"]).is_err());
}

#[test]
fn log_flags_become_overrides() {
    let cli = Cli::try_parse_from([
        "confstrap",
        "init",
        "--log-level",
        "trace",
        "--log-output",
        "stdout",
    ])
    .unwrap();
    let overrides = cli.log_overrides();
    assert_eq!(overrides.level.as_deref(), Some("trace"));
    assert_eq!(overrides.output.as_deref(), Some("stdout"));
    assert_eq!(overrides.format, None);
    assert_eq!(cli.command, Commands::Init);
}

#[test]
fn init_reports_config_file_and_migration() {
    let home = TempDir::new().unwrap();
    write_file(&legacy_dir(&home).join("config.yml"), "wtf: {}\n");
    let (cli, _) = cli_in(&home);

    let output = cli.execute(&Commands::Init).unwrap();

    assert!(output.contains("Config file:"));
    assert!(output.contains("config.yml"));
    assert!(output.contains("Seeded defaults: no"));
    assert!(output.contains("moved 1 files"));
}

#[test]
fn load_default_config_lists_top_level_keys() {
    let home = TempDir::new().unwrap();
    let (cli, _) = cli_in(&home);

    let output = cli.execute(&Commands::Load { config: None }).unwrap();

    assert!(output.contains("Loaded"));
    assert!(output.contains("Top-level keys: wtf"));
}

#[test]
fn load_custom_config_from_home_relative_path() {
    let home = TempDir::new().unwrap();
    write_file(&home.path().join("custom.yml"), "alpha: 1\nbeta: 2\n");
    let (cli, _) = cli_in(&home);

    let output = cli
        .execute(&Commands::Load {
            config: Some("~/custom.yml".to_string()),
        })
        .unwrap();

    assert!(output.contains("Loaded ~/custom.yml"));
    assert!(output.contains("alpha, beta"));
}

#[test]
fn missing_custom_config_uses_custom_diagnostic() {
    let home = TempDir::new().unwrap();
    let (cli, reporter) = cli_in(&home);

    let err = cli
        .execute(&Commands::Load {
            config: Some("~/nope.yml".to_string()),
        })
        .unwrap_err();

    match &err {
        CliError::Load(load) => assert_eq!(load.origin, ConfigOrigin::Custom),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);

    cli.report_error(&err);
    let messages = reporter.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("That file doesn't exist."));
    assert!(messages[0].contains("~/nope.yml"));
}

#[test]
fn broken_default_config_uses_default_diagnostic() {
    let home = TempDir::new().unwrap();
    write_file(&current_dir(&home).join("config.yml"), "wtf: [unclosed\n");
    let (cli, reporter) = cli_in(&home);

    let err = cli.execute(&Commands::Load { config: None }).unwrap_err();
    match &err {
        CliError::Load(load) => assert_eq!(load.origin, ConfigOrigin::Default),
        other => panic!("unexpected error: {other:?}"),
    }

    cli.report_error(&err);
    let messages = reporter.messages();
    assert!(messages[0].contains("Check in"));
    assert!(messages[0].contains("yamllint"));
    // The broken file is left alone.
    assert_eq!(
        fs::read_to_string(current_dir(&home).join("config.yml")).unwrap(),
        "wtf: [unclosed\n"
    );
}

#[test]
fn paths_json_contract_has_required_fields() {
    let home = TempDir::new().unwrap();
    fs::create_dir_all(legacy_dir(&home)).unwrap();
    let (cli, _) = cli_in(&home);

    let output = cli
        .execute(&Commands::Paths {
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["migration"], "pending");
    let entries = parsed["entries"].as_array().expect("entries array should exist");
    assert_eq!(entries.len(), 4);
    for entry in entries {
        assert!(entry.get("name").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("configured").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("path").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("exists").and_then(|v| v.as_bool()).is_some());
    }
    // Inspecting paths does not bootstrap anything.
    assert!(!current_dir(&home).exists());
}

#[test]
fn paths_text_output_has_table_and_migration_line() {
    let home = TempDir::new().unwrap();
    let (cli, _) = cli_in(&home);

    let output = cli
        .execute(&Commands::Paths {
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("config_dir"));
    assert!(output.contains("~/.config/wtf/"));
    assert!(output.contains("Migration: no legacy directory"));
}
