//! Turn arbitration contract.

use std::sync::atomic::{AtomicBool, Ordering};

/// Read-only view of the combat turn state owned by the combat director.
///
/// The ability manager only reads these flags; it never changes whose turn
/// it is.
pub trait CombatManager: Send + Sync {
    /// Whether an encounter is in progress.
    fn in_combat(&self) -> bool;

    /// Whether the player currently owns the turn. Meaningless out of combat.
    fn is_player_turn(&self) -> bool;
}

/// Notifications the director delivers to the ability manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatNotification {
    /// A new turn began; `player_turn` tells whose.
    TurnStarted { player_turn: bool },
    /// The encounter finished.
    CombatEnded,
}

/// Minimal shared-flag implementation of [`CombatManager`].
///
/// Useful for tests and for hosts that arbitrate turns elsewhere and only
/// need to mirror the two flags.
#[derive(Debug, Default)]
pub struct CombatFlags {
    in_combat: AtomicBool,
    player_turn: AtomicBool,
}

impl CombatFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for an encounter where the player holds the turn.
    pub fn player_turn() -> Self {
        let flags = Self::new();
        flags.set_in_combat(true);
        flags.set_player_turn(true);
        flags
    }

    pub fn set_in_combat(&self, in_combat: bool) {
        self.in_combat.store(in_combat, Ordering::Relaxed);
    }

    pub fn set_player_turn(&self, player_turn: bool) {
        self.player_turn.store(player_turn, Ordering::Relaxed);
    }
}

impl CombatManager for CombatFlags {
    fn in_combat(&self) -> bool {
        self.in_combat.load(Ordering::Relaxed)
    }

    fn is_player_turn(&self) -> bool {
        self.player_turn.load(Ordering::Relaxed)
    }
}
