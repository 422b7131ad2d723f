//! Confstrap: Config Store Bootstrap
//!
//! Makes sure a desktop application's configuration directory and file exist
//! on first run, and moves configuration from the legacy directory layout to
//! the current XDG-style one.

pub mod bootstrap;
pub mod default_config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod logging;
pub mod migrate;
pub mod paths;
pub mod provision;
pub mod report;
pub mod settings;
pub mod tooling;

pub use bootstrap::{Bootstrap, BootstrapSummary};
pub use error::{ConfigLoadError, ConfigOrigin, FatalBootstrapError, PathError, ProvisionError};
pub use loader::{AppConfig, ConfigLoader, ConfigParser, YamlParser};
pub use paths::{ConfigLayout, PathResolver};
