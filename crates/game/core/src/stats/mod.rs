//! Stat modifiers.
//!
//! Ability magnitudes and derived player stats run through a [`BonusStack`]
//! per [`StatKey`]. [`ModifierTable`] is the in-process
//! [`crate::StatModifierPipeline`]; hosts with their own aggregation can
//! implement the trait directly instead.
//!
//! ## Bonus Stack
//!
//! Every stat uses the same calculation order:
//! `Flat → %Inc → More → Less → Clamp`
pub mod bonus;
pub mod table;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use table::{ModifierEntry, ModifierSheet, ModifierTable, StatKey};
