//! Turn arbitration for encounters.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use tactics_core::{CombatManager, CombatNotification};

/// Owns the encounter's turn state.
///
/// The session is the only writer. The ability manager reads the flags
/// through [`CombatManager`] and learns about transitions from the
/// notifications the mutating methods return.
#[derive(Debug, Default)]
pub struct CombatDirector {
    in_combat: AtomicBool,
    player_turn: AtomicBool,
    round: AtomicU32,
}

impl CombatDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an encounter. No one holds the turn until [`Self::begin_turn`].
    pub fn start(&self) {
        self.round.store(0, Ordering::Relaxed);
        self.player_turn.store(false, Ordering::Relaxed);
        self.in_combat.store(true, Ordering::Relaxed);
    }

    /// Hands the turn to the player or the enemy side. A player turn opens a
    /// new round.
    pub fn begin_turn(&self, player_turn: bool) -> CombatNotification {
        if player_turn {
            self.round.fetch_add(1, Ordering::Relaxed);
        }
        self.player_turn.store(player_turn, Ordering::Relaxed);
        CombatNotification::TurnStarted { player_turn }
    }

    pub fn end(&self) -> CombatNotification {
        self.in_combat.store(false, Ordering::Relaxed);
        self.player_turn.store(false, Ordering::Relaxed);
        CombatNotification::CombatEnded
    }

    /// Player turns started in the current encounter.
    pub fn round(&self) -> u32 {
        self.round.load(Ordering::Relaxed)
    }
}

impl CombatManager for CombatDirector {
    fn in_combat(&self) -> bool {
        self.in_combat.load(Ordering::Relaxed)
    }

    fn is_player_turn(&self) -> bool {
        self.in_combat() && self.player_turn.load(Ordering::Relaxed)
    }
}
