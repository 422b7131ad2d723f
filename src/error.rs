//! Error types for path resolution, provisioning, migration, and config loading.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from expanding a home-relative config path.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot expand user-specific home dir in '{0}'")]
    MalformedPath(String),

    #[error("cannot find user-specific home dir")]
    HomeDirUnavailable,
}

/// Filesystem failures while provisioning, copying, or removing config entries.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProvisionError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProvisionError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Unrecoverable bootstrap failure.
///
/// Returned up to the entry point, which reports it and decides how to
/// terminate. The library itself never exits the process.
#[derive(Debug, Error)]
pub enum FatalBootstrapError {
    #[error("could not resolve '{display}': {source}")]
    Resolve {
        display: String,
        #[source]
        source: PathError,
    },

    #[error("could not create the '{display}' directory: {source}")]
    CreateDirectory {
        display: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not provision '{file_name}': {source}")]
    ProvisionFile {
        file_name: String,
        #[source]
        source: ProvisionError,
    },

    #[error("could not write default content to {}: {source}", path.display())]
    SeedConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not migrate {} to {}: {source}", from.display(), to.display())]
    MigrateLegacy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: ProvisionError,
    },
}

impl FatalBootstrapError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Where a config file path came from. Drives the load-failure diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// The canonical file inside the current config directory
    Default,
    /// A path the user passed explicitly
    Custom,
}

#[derive(Debug, Error)]
pub enum LoadErrorKind {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure to load a configuration file, tagged with where its path came from.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ConfigLoadError {
    pub origin: ConfigOrigin,
    /// The path as the caller supplied it, before expansion
    pub requested: String,
    #[source]
    pub kind: LoadErrorKind,
}

impl ConfigLoadError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Top-level errors surfaced by the command-line tooling.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Bootstrap(#[from] FatalBootstrapError),

    #[error(transparent)]
    Load(#[from] ConfigLoadError),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Bootstrap(e) => e.exit_code(),
            CliError::Load(e) => e.exit_code(),
            CliError::Settings(_) | CliError::Logging(_) | CliError::Output(_) => 1,
        }
    }
}
