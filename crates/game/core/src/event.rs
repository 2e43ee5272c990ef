//! Outbound combat notifications.
//!
//! State owners never call back into listeners. They append a [`CombatEvent`]
//! to the [`EventQueue`] they were handed, and the presentation layer drains
//! the queue once per frame. Consumers must not depend on the relative order
//! of events raised by different owners within a frame.

use crate::state::UnitId;

/// A single observable change in combat state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    // ========================================================================
    // Unit
    // ========================================================================
    HealthChanged { unit: UnitId, current: f32, max: f32 },
    BlockChanged { unit: UnitId, block: f32 },
    Died { unit: UnitId },
    Despawned { unit: UnitId },

    // ========================================================================
    // Player economy
    // ========================================================================
    CoinsChanged { current: u32 },
    CombatStateChanged { in_combat: bool },
    FlipChanceChanged { chance: f32 },
    MovementChanged { moved: f32, max: f32 },

    // ========================================================================
    // Ability flow
    // ========================================================================
    TargetingStarted { slot: usize },
    TargetingCancelled { slot: usize },
    CooldownStarted { slot: usize, duration: f32 },
    AbilityMissed { slot: usize, ability: String },
    AbilityAborted { slot: usize, ability: String },
    AbilityScheduled { slot: usize, ability: String, fire_at: f64 },
    AbilityExecuted { ability: String, enemy_was_hit: bool },
    DelayedEffectsDropped { count: usize },
}

impl CombatEvent {
    /// Unit the event is about, if it concerns a single unit.
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Self::HealthChanged { unit, .. }
            | Self::BlockChanged { unit, .. }
            | Self::Died { unit }
            | Self::Despawned { unit } => Some(*unit),
            _ => None,
        }
    }
}

/// Per-frame buffer of combat events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventQueue {
    events: Vec<CombatEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Removes and yields every queued event in emission order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, CombatEvent> {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Counts queued events matching a predicate. Mostly useful in tests.
    pub fn count(&self, predicate: impl Fn(&CombatEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}
