//! The fixed, versioned config directory layout.

use crate::error::PathError;
use crate::paths::resolver::PathResolver;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Minimal XDG-compatible base directory
pub const XDG_CONFIG_DIR: &str = "~/.config/";

/// First-generation config root. Only read for migration.
pub const LEGACY_CONFIG_DIR: &str = "~/.wtf/";

/// Current config root
pub const CONFIG_DIR: &str = "~/.config/wtf/";

/// Name of the canonical config file inside [`CONFIG_DIR`]
pub const CONFIG_FILE_NAME: &str = "config.yml";

fn default_xdg_config_dir() -> String {
    XDG_CONFIG_DIR.to_string()
}

fn default_legacy_dir() -> String {
    LEGACY_CONFIG_DIR.to_string()
}

fn default_config_dir() -> String {
    CONFIG_DIR.to_string()
}

fn default_config_file_name() -> String {
    CONFIG_FILE_NAME.to_string()
}

/// Config store layout, as unresolved config paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLayout {
    /// Parent of `config_dir`; created non-recursively before it
    #[serde(default = "default_xdg_config_dir")]
    pub xdg_config_dir: String,

    #[serde(default = "default_legacy_dir")]
    pub legacy_dir: String,

    #[serde(default = "default_config_dir")]
    pub config_dir: String,

    #[serde(default = "default_config_file_name")]
    pub config_file_name: String,
}

impl Default for ConfigLayout {
    fn default() -> Self {
        Self {
            xdg_config_dir: default_xdg_config_dir(),
            legacy_dir: default_legacy_dir(),
            config_dir: default_config_dir(),
            config_file_name: default_config_file_name(),
        }
    }
}

/// A layout with every entry expanded to a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLayout {
    pub xdg_config_dir: PathBuf,
    pub legacy_dir: PathBuf,
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigLayout {
    pub fn resolve(&self, resolver: &PathResolver) -> Result<ResolvedLayout, PathError> {
        let config_dir = resolver.resolve(&self.config_dir)?;
        Ok(ResolvedLayout {
            xdg_config_dir: resolver.resolve(&self.xdg_config_dir)?,
            legacy_dir: resolver.resolve(&self.legacy_dir)?,
            config_file: config_dir.join(&self.config_file_name),
            config_dir,
        })
    }
}
