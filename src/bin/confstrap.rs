//! Confstrap CLI Binary
//!
//! The only place that turns a bootstrap or load failure into a process exit.

use clap::Parser;
use confstrap::diagnostics;
use confstrap::error::CliError;
use confstrap::logging::init_logging;
use confstrap::paths::ConfigLayout;
use confstrap::report::{Reporter, TerminalReporter};
use confstrap::settings::Settings;
use confstrap::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            let err = CliError::from(e);
            TerminalReporter.report(&diagnostics::cli_error(&err, &ConfigLayout::default()));
            process::exit(err.exit_code());
        }
    };

    if let Err(e) = init_logging(Some(&settings.logging), &cli.log_overrides()) {
        eprintln!("Error initializing logging: {}", e);
    }

    let context = CliContext::new(settings);
    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            context.report_error(&e);
            process::exit(e.exit_code());
        }
    }
}
