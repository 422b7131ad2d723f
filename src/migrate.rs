//! One-time migration from the legacy config root to the current one.

pub mod copier;
pub mod legacy;

pub use copier::{copy_recursive, CopyStats};
pub use legacy::{CleanupStatus, LegacyMigrator, MigrationOutcome, MigrationState};
