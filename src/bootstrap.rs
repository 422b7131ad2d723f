//! First-run bootstrap of the config store.
//!
//! Runs, in order: legacy migration, the XDG base directory, the app config
//! directory, and the seeded config file. Every step is create-if-missing, so
//! a run interrupted part way is finished by the next one.

use crate::default_config::DEFAULT_CONFIG_FILE;
use crate::error::FatalBootstrapError;
use crate::migrate::{LegacyMigrator, MigrationOutcome};
use crate::paths::{ConfigLayout, PathResolver};
use crate::provision::{DirectoryProvisioner, DirectoryState, FileProvisioner};
use crate::report::Reporter;
use std::path::PathBuf;
use std::sync::Arc;

/// What one [`Bootstrap::initialize`] run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub migration: MigrationOutcome,
    pub xdg_config_dir: DirectoryState,
    pub config_dir: DirectoryState,
    pub config_file: PathBuf,
    /// True when the config file received the default content this run
    pub seeded: bool,
}

pub struct Bootstrap {
    layout: ConfigLayout,
    resolver: PathResolver,
    reporter: Arc<dyn Reporter>,
    default_content: String,
}

impl Bootstrap {
    pub fn new(layout: ConfigLayout, resolver: PathResolver, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            layout,
            resolver,
            reporter,
            default_content: DEFAULT_CONFIG_FILE.to_string(),
        }
    }

    /// Replace the content seeded into an empty config file.
    pub fn with_default_content(mut self, content: impl Into<String>) -> Self {
        self.default_content = content.into();
        self
    }

    pub fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    pub fn initialize(&self) -> Result<BootstrapSummary, FatalBootstrapError> {
        let migration = LegacyMigrator::new(
            self.resolver.clone(),
            &self.layout.legacy_dir,
            &self.layout.config_dir,
            self.reporter.clone(),
        )
        .run()?;

        let directories = DirectoryProvisioner::new(self.resolver.clone());
        let xdg_config_dir = directories.ensure(&self.layout.xdg_config_dir)?;
        let config_dir = directories.ensure(&self.layout.config_dir)?;

        let seed = FileProvisioner::new(self.resolver.clone(), &self.layout.config_dir)
            .ensure_seeded(&self.layout.config_file_name, &self.default_content)?;

        tracing::info!(
            config_file = %seed.path.display(),
            seeded = seed.seeded,
            "Config store ready"
        );

        Ok(BootstrapSummary {
            migration,
            xdg_config_dir,
            config_dir,
            config_file: seed.path,
            seeded: seed.seeded,
        })
    }
}
