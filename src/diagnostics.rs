//! Formatted diagnostics for the report sink.

use crate::error::{CliError, ConfigLoadError, ConfigOrigin, FatalBootstrapError};
use crate::paths::ConfigLayout;
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::path::Path;

fn headline(text: &str) -> String {
    format!("{} {}", "ERROR:".bold(), text)
}

fn quoted(value: impl Display) -> String {
    format!("'{}'", value.yellow())
}

fn error_line(err: impl Display) -> String {
    format!("Error: {}", err.red())
}

/// Failure to create one of the config directories.
pub fn directory_create_error(display: &str, err: impl Display) -> String {
    format!(
        "{}\n\n{}",
        headline(&format!("Could not create the {} directory.", quoted(display))),
        error_line(err)
    )
}

/// The legacy directory could not be removed after a successful migration.
pub fn cleanup_warning(legacy_dir: &Path, err: impl Display) -> String {
    format!(
        "{} Your configuration was moved, but {} could not be removed.\n\n{}",
        "WARNING:".bold(),
        quoted(legacy_dir.display()),
        error_line(err)
    )
}

pub fn bootstrap_error(err: &FatalBootstrapError) -> String {
    match err {
        FatalBootstrapError::Resolve { display, source } => format!(
            "{}\n\n{}",
            headline(&format!("Could not resolve the {} path.", quoted(display))),
            error_line(source)
        ),
        FatalBootstrapError::CreateDirectory {
            display, source, ..
        } => directory_create_error(display, source),
        FatalBootstrapError::ProvisionFile { file_name, source } => format!(
            "{}\n\n{}",
            headline(&format!("Could not create {}.", quoted(file_name))),
            error_line(source)
        ),
        FatalBootstrapError::SeedConfigFile { path, source } => format!(
            "{}\n\n{}",
            headline(&format!(
                "Could not write the default configuration to {}.",
                quoted(path.display())
            )),
            error_line(source)
        ),
        FatalBootstrapError::MigrateLegacy { from, to, source } => format!(
            "{}\n\n{}",
            headline(&format!(
                "Could not move your configuration from {} to {}.",
                quoted(from.display()),
                quoted(to.display())
            )),
            error_line(source)
        ),
    }
}

/// Load failure. The hint differs for the canonical file and a user-supplied path.
pub fn config_load_error(err: &ConfigLoadError, layout: &ConfigLayout) -> String {
    let file = quoted(&layout.config_file_name);
    let causes = match err.origin {
        ConfigOrigin::Default => [
            format!(
                "Your {} file is missing. Check in {} to see if {} is there.",
                file,
                quoted(layout.config_dir.trim_end_matches(|c: char| c == '/' || c == '\\')),
                file
            ),
            format!(
                "Your {} file has a syntax error. Try running it through http://www.yamllint.com to check for errors.",
                file
            ),
        ],
        ConfigOrigin::Custom => [
            "That file doesn't exist.".to_string(),
            "That file has a YAML syntax error. Try running it through http://www.yamllint.com to check for errors."
                .to_string(),
        ],
    };
    let target = match err.origin {
        ConfigOrigin::Default => file.clone(),
        ConfigOrigin::Custom => quoted(&err.requested),
    };

    format!(
        "{}\n\nThis could mean one of two things:\n\n    1. {}\n    2. {}\n\n{}",
        headline(&format!("Could not load {}.", target)),
        causes[0],
        causes[1],
        error_line(&err.kind)
    )
}

pub fn cli_error(err: &CliError, layout: &ConfigLayout) -> String {
    match err {
        CliError::Bootstrap(e) => bootstrap_error(e),
        CliError::Load(e) => config_load_error(e, layout),
        other => format!("{}\n\n{}", headline("Could not start."), error_line(other)),
    }
}
