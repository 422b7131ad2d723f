//! Legacy config root migration.
//!
//! The current root always wins: if it exists, nothing is copied or removed,
//! whatever the legacy root holds. Otherwise the legacy tree is copied into a
//! staging directory beside the current root, renamed into place, and the
//! legacy tree is removed.
//!
//! A legacy root that is a symlink is followed for the copy. Cleanup removes
//! only the link, never the tree it points at.

use crate::diagnostics;
use crate::error::{FatalBootstrapError, ProvisionError};
use crate::migrate::copier::{copy_recursive, CopyStats};
use crate::paths::PathResolver;
use crate::report::Reporter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const STAGING_PREFIX: &str = ".migrating-";

type RemoveFn = fn(&Path) -> io::Result<()>;

/// Where the two roots stand before anything is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationState {
    NoLegacy,
    AlreadyMigrated,
    MigrationNeeded { from: PathBuf, to: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStatus {
    Removed,
    /// The legacy tree is still on disk. Holds the removal error.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    NoLegacy,
    AlreadyMigrated,
    Migrated {
        stats: CopyStats,
        cleanup: CleanupStatus,
    },
}

pub struct LegacyMigrator {
    resolver: PathResolver,
    legacy_dir: String,
    config_dir: String,
    reporter: Arc<dyn Reporter>,
    remove: RemoveFn,
}

impl LegacyMigrator {
    pub fn new(
        resolver: PathResolver,
        legacy_dir: impl Into<String>,
        config_dir: impl Into<String>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            resolver,
            legacy_dir: legacy_dir.into(),
            config_dir: config_dir.into(),
            reporter,
            remove: |path| fs::remove_dir_all(path),
        }
    }

    #[cfg(test)]
    fn with_remover(mut self, remove: RemoveFn) -> Self {
        self.remove = remove;
        self
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, FatalBootstrapError> {
        self.resolver
            .resolve(path)
            .map_err(|source| FatalBootstrapError::Resolve {
                display: path.to_string(),
                source,
            })
    }

    /// Inspect both roots without changing anything.
    pub fn state(&self) -> Result<MigrationState, FatalBootstrapError> {
        let from = self.resolve(&self.legacy_dir)?;
        let to = self.resolve(&self.config_dir)?;

        if let Err(e) = fs::metadata(&from) {
            if e.kind() == io::ErrorKind::NotFound {
                return Ok(MigrationState::NoLegacy);
            }
        }
        if fs::metadata(&to).is_ok() {
            return Ok(MigrationState::AlreadyMigrated);
        }

        Ok(MigrationState::MigrationNeeded { from, to })
    }

    /// Migrate the legacy root if needed.
    ///
    /// A copy failure is fatal and leaves no current root behind, so the next
    /// run retries. A cleanup failure is reported and the run continues.
    pub fn run(&self) -> Result<MigrationOutcome, FatalBootstrapError> {
        let (from, to) = match self.state()? {
            MigrationState::NoLegacy => {
                tracing::debug!("No legacy config directory, nothing to migrate");
                return Ok(MigrationOutcome::NoLegacy);
            }
            MigrationState::AlreadyMigrated => {
                tracing::debug!("Current config directory exists, skipping migration");
                return Ok(MigrationOutcome::AlreadyMigrated);
            }
            MigrationState::MigrationNeeded { from, to } => (from, to),
        };

        tracing::info!(from = %from.display(), to = %to.display(), "Migrating legacy config directory");
        let stats = staged_copy(&from, &to).map_err(|source| FatalBootstrapError::MigrateLegacy {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        tracing::info!(
            files = stats.files,
            directories = stats.directories,
            skipped = stats.skipped,
            "Copied legacy config tree"
        );

        let cleanup = self.remove_legacy(&from, &to);
        Ok(MigrationOutcome::Migrated { stats, cleanup })
    }

    fn remove_legacy(&self, from: &Path, to: &Path) -> CleanupStatus {
        if !to.exists() {
            let message = format!("{} is missing after migration", to.display());
            tracing::warn!(legacy = %from.display(), "{}", message);
            self.reporter
                .report(&diagnostics::cleanup_warning(from, &message));
            return CleanupStatus::Failed(message);
        }

        // Does not follow a symlinked root, so a link target survives.
        match (self.remove)(from) {
            Ok(()) => {
                tracing::info!(path = %from.display(), "Removed legacy config directory");
                CleanupStatus::Removed
            }
            Err(e) => {
                tracing::warn!(path = %from.display(), error = %e, "Failed to remove legacy config directory");
                self.reporter
                    .report(&diagnostics::cleanup_warning(from, &e));
                CleanupStatus::Failed(e.to_string())
            }
        }
    }
}

/// Copy `from` into a staging directory next to `to`, then rename it into place.
fn staged_copy(from: &Path, to: &Path) -> Result<CopyStats, ProvisionError> {
    let parent = to.parent().ok_or_else(|| {
        ProvisionError::io(
            "stage",
            to,
            io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent"),
        )
    })?;
    fs::create_dir_all(parent).map_err(|e| ProvisionError::io("create", parent, e))?;
    sweep_stale_staging(parent);

    // Dropping the guard removes whatever is left in the staging directory.
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| ProvisionError::io("stage", parent, e))?;
    let staged_root = staging.path().join("tree");

    let source = fs::canonicalize(from).map_err(|e| ProvisionError::io("resolve", from, e))?;
    let stats = copy_recursive(&source, &staged_root)?;
    fs::rename(&staged_root, to).map_err(|e| ProvisionError::io("rename", to, e))?;

    Ok(stats)
}

/// Remove staging directories left by a run that was killed mid-copy.
fn sweep_stale_staging(parent: &Path) {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %parent.display(), error = %e, "Could not list staging parent");
            return;
        }
    };

    for entry in entries.flatten() {
        let is_staging = entry.file_name().to_string_lossy().starts_with(STAGING_PREFIX);
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_staging || !is_dir {
            continue;
        }
        let path = entry.path();
        match fs::remove_dir_all(&path) {
            Ok(()) => tracing::info!(path = %path.display(), "Removed stale staging directory"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove stale staging directory")
            }
        }
    }
}
