//! Data-driven content definitions and loaders.
//!
//! This crate houses static combat content and provides loaders for RON/TOML data files:
//! - Ability catalogs (data-driven via RON)
//! - Slot loadouts and equipment modifiers (data-driven via RON)
//! - Encounter rosters (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is read-only input: the core consumes the resulting definitions and
//! never writes them back.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{AbilityCatalog, CatalogError, Encounter, EnemySpec, Loadout};

#[cfg(feature = "loaders")]
pub use loaders::{AbilityLoader, ConfigLoader, ContentFactory, EncounterLoader, LoadoutLoader};
