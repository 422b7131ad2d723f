//! Config path handling: home directory lookup, `~` expansion, and the
//! fixed directory layout.

pub mod home;
pub mod layout;
pub mod resolver;

pub use home::{FixedHomeDir, HomeDirProvider, SystemHomeDir};
pub use layout::{ConfigLayout, ResolvedLayout};
pub use resolver::PathResolver;
