//! Expansion of home-relative config paths.
//!
//! A config path is either taken as given, or starts with `~`. The marker must
//! stand alone or be followed directly by a separator (`/` or `\`); `~user`
//! style paths are rejected.

use crate::error::PathError;
use crate::paths::home::{FixedHomeDir, HomeDirProvider, SystemHomeDir};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

const HOME_MARKER: char = '~';

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Resolves config paths against an injected home directory provider.
#[derive(Clone)]
pub struct PathResolver {
    home: Arc<dyn HomeDirProvider>,
}

impl fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathResolver").finish_non_exhaustive()
    }
}

impl PathResolver {
    pub fn new(home: Arc<dyn HomeDirProvider>) -> Self {
        Self { home }
    }

    /// Resolver backed by the executing user's home directory.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemHomeDir::new()))
    }

    /// Resolver with a fixed home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FixedHomeDir::new(home)))
    }

    /// The home directory, rejecting a missing or empty one.
    pub fn home_dir(&self) -> Result<PathBuf, PathError> {
        match self.home.home_dir() {
            Some(home) if !home.as_os_str().is_empty() => Ok(home),
            _ => Err(PathError::HomeDirUnavailable),
        }
    }

    /// Expand a leading `~` into the home directory.
    ///
    /// Paths without the marker, including the empty path, come back unchanged.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, PathError> {
        let Some(rest) = path.strip_prefix(HOME_MARKER) else {
            return Ok(PathBuf::from(path));
        };

        match rest.chars().next() {
            None => {}
            Some(c) if is_separator(c) => {}
            Some(_) => return Err(PathError::MalformedPath(path.to_string())),
        }

        let home = self.home_dir()?;
        let remainder = rest.trim_start_matches(is_separator);
        if remainder.is_empty() {
            Ok(home)
        } else {
            // Rebuilt from components to drop trailing separators.
            Ok(home.join(remainder).components().collect())
        }
    }

    /// Like [`resolve`](Self::resolve), but falls back to the path as given
    /// when expansion fails. The failure is logged, never returned.
    pub fn resolve_lenient(&self, path: &str) -> PathBuf {
        match self.resolve(path) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(path, error = %e, "Using unresolved config path");
                PathBuf::from(path)
            }
        }
    }
}
