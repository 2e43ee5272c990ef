//! Deterministic combat rules for the tactical layer.
//!
//! `tactics-core` defines how units take damage and gain block, how the player
//! spends coins and flips for ability success, and how abilities run their
//! effect chains against resolved targets. It owns no clocks, threads or I/O:
//! time arrives through [`engine::PlayerAbilityManager::update`], randomness
//! through [`env::RngOracle`], and every outward notification is queued as a
//! [`event::CombatEvent`] for the presentation layer to drain.
//!
//! Modules are organized leaf-first:
//! - [`state`] holds [`Unit`], [`Player`] and the [`Roster`] that addresses them
//! - [`stats`] provides the layered bonus stack and [`ModifierTable`]
//! - [`ability`] defines abilities, effects, targeting and the execution pipeline
//! - [`engine`] hosts the [`PlayerAbilityManager`] orchestrator
//! - [`env`] declares the collaborator contracts (combat turns, stats, narration, RNG)
pub mod ability;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;
pub mod stats;

pub use ability::{
    Ability, AbilityEffect, AbilityExecutionContext, AbilityTargeting, AppliedEffect, EffectKind,
    ExecutionReport, IntentTargeting, TargetingError, TargetingIntent, TargetingNotification,
    TargetingResult, TargetingType, execute_ability,
};
pub use config::{CombatConfig, DelayedEffectPolicy, FlipConfig, PlayerDefaults};
pub use engine::{
    CastOutcome, CooldownTimers, EffectScheduler, ManagerPhase, PendingExecution,
    PlayerAbilityManager, SlotError, StartAbilityError,
};
pub use env::{
    CombatFlags, CombatManager, CombatNotification, FixedRoll, MessageQueue, NarrationSink,
    PcgRng, RngOracle, ScriptedRng, SilentNarration, StatModifierPipeline,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{CombatEvent, EventQueue};
pub use state::{
    AdaptiveFlip, CoinError, DamageReport, MoveError, Player, Roster, Unit, UnitCapabilities,
    UnitId, Vec3,
};
pub use stats::{Bonus, BonusStack, ModifierEntry, ModifierTable, StatKey};
