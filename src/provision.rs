//! Provisioning: make sure config directories and files exist.

pub mod directory;
pub mod file;

pub use directory::{DirectoryProvisioner, DirectoryState};
pub use file::{FileProvisioner, SeedOutcome};
