//! Contracts for the collaborators the combat rules depend on.
//!
//! The core never reaches for process-wide singletons. Turn arbitration,
//! stat modifiers, narration output and randomness are injected as trait
//! objects into the constructors of [`crate::Player`] and
//! [`crate::PlayerAbilityManager`], so every test can build its own isolated
//! graph.
mod combat;
mod narration;
mod rng;
mod stats;

pub use combat::{CombatFlags, CombatManager, CombatNotification};
pub use narration::{MessageQueue, NarrationSink, SilentNarration, messages};
pub use rng::{FixedRoll, PcgRng, RngOracle, ScriptedRng};
pub use stats::StatModifierPipeline;
