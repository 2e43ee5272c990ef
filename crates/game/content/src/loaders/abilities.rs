//! Ability catalog loader.

use std::path::Path;

use tactics_core::Ability;

use crate::catalog::AbilityCatalog;
use crate::loaders::{LoadResult, read_file};

const BUILTIN_ABILITIES: &str = include_str!("../../data/abilities.ron");

/// Loader for ability catalogs from RON files.
///
/// The file holds a list of [`Ability`] definitions:
///
/// ```text
/// [
///     (
///         name: "Firebolt",
///         effects: [(kind: Damage(amount: 12.0))],
///     ),
/// ]
/// ```
pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AbilityCatalog> {
        let abilities: Vec<Ability> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse abilities RON: {}", e))?;

        for ability in &abilities {
            if ability.effects.is_empty() {
                anyhow::bail!("Ability '{}' has no effects", ability.name);
            }
        }

        Ok(AbilityCatalog::from_abilities(abilities)?)
    }

    /// Shipped ability set.
    pub fn builtin() -> LoadResult<AbilityCatalog> {
        Self::parse(BUILTIN_ABILITIES)
    }
}
