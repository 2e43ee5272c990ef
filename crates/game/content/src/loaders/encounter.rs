//! Encounter loader.

use std::path::Path;

use crate::catalog::Encounter;
use crate::loaders::{LoadResult, read_file};

const BUILTIN_ENCOUNTER: &str = include_str!("../../data/encounters/goblin_camp.ron");

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse an encounter, rejecting ones with nothing to fight.
    pub fn parse(content: &str) -> LoadResult<Encounter> {
        let encounter: Encounter = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        if encounter.hostile_count() == 0 {
            anyhow::bail!("Encounter '{}' has no hostile units", encounter.name);
        }
        if let Some(enemy) = encounter.enemies.iter().find(|e| e.max_health.is_nan() || e.max_health <= 0.0) {
            anyhow::bail!(
                "Enemy '{}' in encounter '{}' has non-positive health",
                enemy.name,
                encounter.name
            );
        }

        Ok(encounter)
    }

    pub fn builtin() -> LoadResult<Encounter> {
        Self::parse(BUILTIN_ENCOUNTER)
    }
}
