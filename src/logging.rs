//! Logging System
//!
//! Structured logging through `tracing`. Diagnostics meant for the user go
//! through the report sink instead, so the default here is quiet: `warn` and
//! above, as text on stderr.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_ENV: &str = "CONFSTRAP_LOG";
const LOG_FORMAT_ENV: &str = "CONFSTRAP_LOG_FORMAT";
const LOG_OUTPUT_ENV: &str = "CONFSTRAP_LOG_OUTPUT";
const LOG_FILE_ENV: &str = "CONFSTRAP_LOG_FILE";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file, file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means the platform state dir
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Command-line logging flags. Each one beats the environment and the settings.
#[derive(Debug, Clone, Default)]
pub struct LogOverrides {
    pub level: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

/// Resolve the log file path: CLI, then CONFSTRAP_LOG_FILE, then settings, then default.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    if let Some(p) = cli_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    if let Ok(env_path) = std::env::var(LOG_FILE_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(p);
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, CliError> {
    let project_dirs = directories::ProjectDirs::from("", "confstrap", "confstrap").ok_or_else(
        || CliError::Logging("Could not determine platform directories for log file".to_string()),
    )?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir());
    Ok(dir.join("confstrap.log"))
}

/// Initialize the global subscriber.
pub fn init_logging(
    config: Option<&LoggingConfig>,
    overrides: &LogOverrides,
) -> Result<(), CliError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(|e| CliError::Logging(e.to_string()));
    }

    let filter = build_env_filter(config, overrides)?;
    let format = determine_format(config, overrides)?;
    let output = determine_output(config, overrides)?;
    let writer = build_writer(output, config, overrides)?;
    let use_color = config.color && !output.file;

    let subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| CliError::Logging(e.to_string()))
}

fn build_writer(
    output: OutputDestinations,
    config: &LoggingConfig,
    overrides: &LogOverrides,
) -> Result<BoxMakeWriter, CliError> {
    if !output.file {
        return Ok(if output.stdout && output.stderr {
            BoxMakeWriter::new(std::io::stdout.and(std::io::stderr))
        } else if output.stdout {
            BoxMakeWriter::new(std::io::stdout)
        } else {
            BoxMakeWriter::new(std::io::stderr)
        });
    }

    let log_file = resolve_log_file_path(overrides.file.clone(), config.file.clone())?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::Logging(format!("Failed to create log directory: {}", e))
        })?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            CliError::Logging(format!("Failed to open log file {:?}: {}", log_file, e))
        })?;
    let file = Arc::new(file);

    Ok(if output.stderr {
        BoxMakeWriter::new(file.and(std::io::stderr))
    } else {
        BoxMakeWriter::new(file)
    })
}

fn build_env_filter(
    config: &LoggingConfig,
    overrides: &LogOverrides,
) -> Result<EnvFilter, CliError> {
    if let Some(level) = &overrides.level {
        return parse_filter(level);
    }
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    parse_filter(&config.level)
}

fn parse_filter(directive: &str) -> Result<EnvFilter, CliError> {
    EnvFilter::try_new(directive)
        .map_err(|e| CliError::Logging(format!("Invalid log level '{}': {}", directive, e)))
}

fn determine_format(config: &LoggingConfig, overrides: &LogOverrides) -> Result<String, CliError> {
    let format = overrides
        .format
        .clone()
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        .unwrap_or_else(|| config.format.clone());
    match format.as_str() {
        "json" | "text" => Ok(format),
        other => Err(CliError::Logging(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

fn determine_output(
    config: &LoggingConfig,
    overrides: &LogOverrides,
) -> Result<OutputDestinations, CliError> {
    let output = overrides
        .output
        .clone()
        .or_else(|| std::env::var(LOG_OUTPUT_ENV).ok())
        .unwrap_or_else(|| config.output.clone());
    parse_output_destinations(&output)
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations, CliError> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "both" => (true, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        _ => {
            return Err(CliError::Logging(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'both', 'file', or 'file+stderr')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
