//! Content definitions consumed by the runtime.

use std::collections::BTreeMap;
use std::sync::Arc;

use arrayvec::ArrayVec;
use tactics_core::{Ability, CombatConfig, ErrorSeverity, GameError, ModifierEntry};

/// Abilities indexed by name.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    abilities: BTreeMap<String, Arc<Ability>>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate names.
    pub fn from_abilities(
        abilities: impl IntoIterator<Item = Ability>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for ability in abilities {
            catalog.insert(ability)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, ability: Ability) -> Result<(), CatalogError> {
        if self.abilities.contains_key(&ability.name) {
            return Err(CatalogError::Duplicate(ability.name));
        }
        self.abilities.insert(ability.name.clone(), Arc::new(ability));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Ability>> {
        self.abilities.get(name)
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.abilities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

/// Catalog lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("ability '{0}' is defined more than once")]
    Duplicate(String),

    #[error("ability '{0}' is not in the catalog")]
    Unknown(String),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Duplicate(_) => ErrorSeverity::Internal,
            Self::Unknown(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate(_) => "CATALOG_DUPLICATE_ABILITY",
            Self::Unknown(_) => "CATALOG_UNKNOWN_ABILITY",
        }
    }
}

/// Slot assignment plus equipment modifiers for the local player.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    /// Ability names by slot index. `None` leaves the slot empty.
    pub slots: ArrayVec<Option<String>, { CombatConfig::ABILITY_SLOTS }>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<ModifierEntry>,
}

impl Loadout {
    /// Resolves slot names against `catalog`.
    pub fn resolve(
        &self,
        catalog: &AbilityCatalog,
    ) -> Result<[Option<Arc<Ability>>; CombatConfig::ABILITY_SLOTS], CatalogError> {
        let mut resolved: [Option<Arc<Ability>>; CombatConfig::ABILITY_SLOTS] = Default::default();
        for (slot, name) in self.slots.iter().enumerate() {
            let Some(name) = name else { continue };
            let ability = catalog
                .get(name)
                .ok_or_else(|| CatalogError::Unknown(name.clone()))?;
            resolved[slot] = Some(Arc::clone(ability));
        }
        Ok(resolved)
    }
}

/// One non-player combatant to spawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpec {
    pub name: String,
    pub max_health: f32,

    /// Props are non-hostile and do not hold the encounter open.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prop: bool,
}

/// A named group of combatants fought together.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub name: String,
    pub enemies: Vec<EnemySpec>,
}

impl Encounter {
    pub fn hostile_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| !enemy.prop).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{AbilityEffect, TargetingType};

    fn create_test_catalog() -> AbilityCatalog {
        AbilityCatalog::from_abilities([
            Ability::new("Firebolt", TargetingType::PointAndClick)
                .with_effect(AbilityEffect::damage(10.0)),
            Ability::new("Mend", TargetingType::PointAndClick)
                .with_effect(AbilityEffect::heal(8.0).on_self()),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut catalog = create_test_catalog();
        let err = catalog
            .insert(Ability::new("Mend", TargetingType::Cone))
            .unwrap_err();
        assert_eq!(err, CatalogError::Duplicate("Mend".into()));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Firebolt", "Mend"]);
    }

    #[test]
    fn loadout_resolves_by_slot() {
        let catalog = create_test_catalog();
        let mut loadout = Loadout::default();
        loadout.slots.push(None);
        loadout.slots.push(Some("Firebolt".into()));

        let slots = loadout.resolve(&catalog).unwrap();

        assert!(slots[0].is_none());
        assert_eq!(slots[1].as_ref().map(|a| a.name.as_str()), Some("Firebolt"));
        assert!(slots[2].is_none());
    }

    #[test]
    fn loadout_with_unknown_ability_fails() {
        let catalog = create_test_catalog();
        let mut loadout = Loadout::default();
        loadout.slots.push(Some("Meteor".into()));

        assert_eq!(
            loadout.resolve(&catalog).unwrap_err(),
            CatalogError::Unknown("Meteor".into())
        );
    }

    #[test]
    fn catalog_errors_render_and_classify() {
        let duplicate = CatalogError::Duplicate("Mend".into());
        assert_eq!(duplicate.to_string(), "ability 'Mend' is defined more than once");
        assert_eq!(duplicate.severity(), ErrorSeverity::Internal);
        assert_eq!(duplicate.error_code(), "CATALOG_DUPLICATE_ABILITY");

        let unknown = CatalogError::Unknown("Meteor".into());
        assert_eq!(unknown.to_string(), "ability 'Meteor' is not in the catalog");
        assert_eq!(unknown.severity(), ErrorSeverity::Validation);
        assert_eq!(unknown.error_code(), "CATALOG_UNKNOWN_ABILITY");
    }
}
