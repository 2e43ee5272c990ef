//! Loadout loader.

use std::path::Path;

use crate::catalog::Loadout;
use crate::loaders::{LoadResult, read_file};

const BUILTIN_LOADOUT: &str = include_str!("../../data/loadout.ron");

/// Loader for slot loadouts from RON files.
pub struct LoadoutLoader;

impl LoadoutLoader {
    pub fn load(path: &Path) -> LoadResult<Loadout> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Loadout> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse loadout RON: {}", e))
    }

    pub fn builtin() -> LoadResult<Loadout> {
        Self::parse(BUILTIN_LOADOUT)
    }
}
