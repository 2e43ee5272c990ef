//! Content loaders for reading combat data from files.
//!
//! Each loader parses one RON/TOML file into a definition from [`crate::catalog`]
//! or [`tactics_core`]. Shipped data is also embedded so hosts can run without a
//! data directory.

pub mod abilities;
pub mod config;
pub mod encounter;
pub mod factory;
pub mod loadout;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use encounter::EncounterLoader;
pub use factory::ContentFactory;
pub use loadout::LoadoutLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
