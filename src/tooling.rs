//! Tooling Layer
//!
//! Command-line surface over the bootstrap, loader, and layout.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
