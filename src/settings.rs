//! Settings for the tool itself: layout overrides and logging.
//!
//! Precedence: built-in defaults, then an optional settings file, then
//! `CONFSTRAP__*` environment variables (`__` separates nested keys, e.g.
//! `CONFSTRAP__LAYOUT__CONFIG_DIR`).

use crate::logging::LoggingConfig;
use crate::paths::ConfigLayout;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "CONFSTRAP";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub layout: ConfigLayout,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&Settings::default())?;
    Ok(Config::builder().add_source(defaults))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Defaults overlaid with the environment.
    pub fn load() -> Result<Self, ConfigError> {
        builder_with_defaults()?
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Defaults, then `path`, then the environment.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}
