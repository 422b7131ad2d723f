//! Create-if-missing and default seeding for files in the config directory.

use crate::error::{FatalBootstrapError, ProvisionError};
use crate::paths::PathResolver;
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Result of [`FileProvisioner::ensure_seeded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    pub path: PathBuf,
    /// True when the file was empty and received the default content
    pub seeded: bool,
}

pub struct FileProvisioner {
    resolver: PathResolver,
    config_dir: String,
}

impl FileProvisioner {
    /// `config_dir` is the unresolved current config root, e.g. `~/.config/wtf/`.
    pub fn new(resolver: PathResolver, config_dir: impl Into<String>) -> Self {
        Self {
            resolver,
            config_dir: config_dir.into(),
        }
    }

    /// Ensure `file_name` exists in the config directory, creating it empty if
    /// absent. Returns the absolute path. Existing content is never touched.
    pub fn ensure_file(&self, file_name: &str) -> Result<PathBuf, ProvisionError> {
        let dir = self.resolver.resolve(&self.config_dir)?;
        let path = dir.join(file_name);

        match std::fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                File::create(&path).map_err(|e| ProvisionError::io("create", &path, e))?;
                tracing::info!(path = %path.display(), "Created config file");
            }
            Err(e) => return Err(ProvisionError::io("stat", &path, e)),
        }

        Ok(path)
    }

    /// Ensure `file_name` exists and is non-empty, writing `default_content`
    /// into it when it has zero length.
    pub fn ensure_seeded(
        &self,
        file_name: &str,
        default_content: &str,
    ) -> Result<SeedOutcome, FatalBootstrapError> {
        let path = self
            .ensure_file(file_name)
            .map_err(|source| FatalBootstrapError::ProvisionFile {
                file_name: file_name.to_string(),
                source,
            })?;

        let len = match std::fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(source) => return Err(FatalBootstrapError::SeedConfigFile { path, source }),
        };
        if len > 0 {
            return Ok(SeedOutcome {
                path,
                seeded: false,
            });
        }

        if let Err(source) = std::fs::write(&path, default_content) {
            return Err(FatalBootstrapError::SeedConfigFile { path, source });
        }
        tracing::info!(path = %path.display(), "Seeded config file with defaults");

        Ok(SeedOutcome { path, seeded: true })
    }
}
