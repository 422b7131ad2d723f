//! Home directory providers.

use std::path::PathBuf;

/// Source of the executing user's home directory.
pub trait HomeDirProvider: Send + Sync {
    /// Returns `None` when no home directory can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Platform home directory via `directories::BaseDirs`.
pub struct SystemHomeDir;

impl SystemHomeDir {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemHomeDir {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeDirProvider for SystemHomeDir {
    fn home_dir(&self) -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
    }
}

/// A fixed home directory, used by tests and embedders that sandbox the store.
#[derive(Debug, Clone)]
pub struct FixedHomeDir(pub PathBuf);

impl FixedHomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl HomeDirProvider for FixedHomeDir {
    fn home_dir(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// A provider that never finds a home directory.
#[cfg(test)]
pub(crate) struct NoHomeDir;

#[cfg(test)]
impl HomeDirProvider for NoHomeDir {
    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}
