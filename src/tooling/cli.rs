//! CLI Tooling
//!
//! Every command runs the bootstrap first, the same way the application does
//! at startup, so the store is in its final shape before anything reads it.

use crate::bootstrap::{Bootstrap, BootstrapSummary};
use crate::diagnostics;
use crate::error::{CliError, ConfigOrigin, FatalBootstrapError};
use crate::loader::ConfigLoader;
use crate::logging::LogOverrides;
use crate::migrate::{CleanupStatus, LegacyMigrator, MigrationOutcome, MigrationState};
use crate::paths::PathResolver;
use crate::provision::DirectoryState;
use crate::report::{Reporter, TerminalReporter};
use crate::settings::Settings;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Confstrap CLI - first-run setup and migration of the config store
#[derive(Parser, Debug)]
#[command(name = "confstrap")]
#[command(about = "Bootstrap and migrate the local configuration store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file for layout and logging overrides (TOML or YAML)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, both, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn log_overrides(&self) -> LogOverrides {
        LogOverrides {
            level: self.log_level.clone(),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create the config directories and file, migrating the legacy directory if present
    Init,
    /// Bootstrap, then load the config file
    Load {
        /// Custom config file instead of the default one
        #[arg(long)]
        config: Option<String>,
    },
    /// Show the resolved layout and what exists on disk
    Paths {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// CLI context holding settings and the injected collaborators.
pub struct CliContext {
    settings: Settings,
    resolver: PathResolver,
    reporter: Arc<dyn Reporter>,
}

impl CliContext {
    /// Context for the executing user, reporting to the terminal.
    pub fn new(settings: Settings) -> Self {
        Self::with_parts(settings, PathResolver::system(), Arc::new(TerminalReporter))
    }

    pub fn with_parts(
        settings: Settings,
        resolver: PathResolver,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            settings,
            resolver,
            reporter,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Format `err` and send it to the report sink.
    pub fn report_error(&self, err: &CliError) {
        self.reporter
            .report(&diagnostics::cli_error(err, &self.settings.layout));
    }

    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Init => {
                let summary = self.bootstrap()?;
                Ok(format_init_summary(&summary))
            }
            Commands::Load { config } => {
                let summary = self.bootstrap()?;
                let loader = ConfigLoader::new(self.resolver.clone());
                let (path, loaded) = match config {
                    Some(custom) => {
                        let loaded = loader.load(custom, ConfigOrigin::Custom)?;
                        (custom.clone(), loaded)
                    }
                    None => {
                        let loaded = loader.load_path(&summary.config_file, ConfigOrigin::Default)?;
                        (summary.config_file.display().to_string(), loaded)
                    }
                };
                let keys = loaded.top_level_keys();
                Ok(format!(
                    "Loaded {}\nTop-level keys: {}",
                    path,
                    if keys.is_empty() {
                        "(none)".to_string()
                    } else {
                        keys.join(", ")
                    }
                ))
            }
            Commands::Paths { format } => self.paths(format),
        }
    }

    fn bootstrap(&self) -> Result<BootstrapSummary, FatalBootstrapError> {
        Bootstrap::new(
            self.settings.layout.clone(),
            self.resolver.clone(),
            self.reporter.clone(),
        )
        .initialize()
    }

    fn paths(&self, format: &str) -> Result<String, CliError> {
        let layout = &self.settings.layout;
        let resolved = layout
            .resolve(&self.resolver)
            .map_err(|source| FatalBootstrapError::Resolve {
                display: "config layout".to_string(),
                source,
            })?;
        let migration = LegacyMigrator::new(
            self.resolver.clone(),
            &layout.legacy_dir,
            &layout.config_dir,
            self.reporter.clone(),
        )
        .state()?;
        let migration = match migration {
            MigrationState::NoLegacy => "no legacy directory",
            MigrationState::AlreadyMigrated => "not needed",
            MigrationState::MigrationNeeded { .. } => "pending",
        };

        let rows = [
            ("xdg_config_dir", layout.xdg_config_dir.as_str(), &resolved.xdg_config_dir),
            ("legacy_dir", layout.legacy_dir.as_str(), &resolved.legacy_dir),
            ("config_dir", layout.config_dir.as_str(), &resolved.config_dir),
            ("config_file", layout.config_file_name.as_str(), &resolved.config_file),
        ];

        if format == "json" {
            let entries: Vec<_> = rows
                .iter()
                .map(|(name, configured, path)| {
                    json!({
                        "name": name,
                        "configured": configured,
                        "path": path.display().to_string(),
                        "exists": path.exists(),
                    })
                })
                .collect();
            let output = json!({ "entries": entries, "migration": migration });
            return serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::Output(e.to_string()));
        }

        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Entry", "Configured", "Path", "Exists"]);
        for (name, configured, path) in &rows {
            table.add_row(vec![
                name.to_string(),
                configured.to_string(),
                path.display().to_string(),
                yes_no(path.exists()).to_string(),
            ]);
        }
        Ok(format!("{}\nMigration: {}", table, migration))
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn describe_directory(state: &DirectoryState) -> String {
    match state {
        DirectoryState::Created(path) => format!("{} (created)", path.display()),
        DirectoryState::Existing(path) => path.display().to_string(),
    }
}

fn describe_migration(outcome: &MigrationOutcome) -> String {
    match outcome {
        MigrationOutcome::NoLegacy => "no legacy directory".to_string(),
        MigrationOutcome::AlreadyMigrated => "not needed".to_string(),
        MigrationOutcome::Migrated { stats, cleanup } => {
            let mut line = format!(
                "moved {} files in {} directories",
                stats.files, stats.directories
            );
            if stats.skipped > 0 {
                line.push_str(&format!(", skipped {} links or special files", stats.skipped));
            }
            if let CleanupStatus::Failed(reason) = cleanup {
                line.push_str(&format!(" (legacy directory left in place: {})", reason));
            }
            line
        }
    }
}

fn format_init_summary(summary: &BootstrapSummary) -> String {
    format!(
        "Config directory: {}\nConfig file: {}\nSeeded defaults: {}\nMigration: {}",
        describe_directory(&summary.config_dir),
        summary.config_file.display(),
        yes_no(summary.seeded),
        describe_migration(&summary.migration)
    )
}
