//! Create-if-missing for config directories.

use crate::error::FatalBootstrapError;
use crate::paths::PathResolver;
use std::io;
use std::path::PathBuf;

/// What [`DirectoryProvisioner::ensure`] found or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryState {
    Existing(PathBuf),
    Created(PathBuf),
}

impl DirectoryState {
    pub fn path(&self) -> &PathBuf {
        match self {
            DirectoryState::Existing(path) | DirectoryState::Created(path) => path,
        }
    }
}

pub struct DirectoryProvisioner {
    resolver: PathResolver,
}

impl DirectoryProvisioner {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Ensure `dir` exists, creating it if absent.
    ///
    /// Creation is not recursive; the parent must already exist. Anything
    /// already at the path counts as present, whatever its type. A path that
    /// fails to expand is used as given (see [`PathResolver::resolve_lenient`]).
    pub fn ensure(&self, dir: &str) -> Result<DirectoryState, FatalBootstrapError> {
        let path = self.resolver.resolve_lenient(dir);

        match std::fs::metadata(&path) {
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Config directory present");
                return Ok(DirectoryState::Existing(path));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                // Only a definite "not found" triggers creation.
                tracing::debug!(path = %path.display(), error = %e, "Could not stat config directory");
                return Ok(DirectoryState::Existing(path));
            }
        }

        std::fs::create_dir(&path).map_err(|source| FatalBootstrapError::CreateDirectory {
            display: dir.to_string(),
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Created config directory");

        Ok(DirectoryState::Created(path))
    }
}
