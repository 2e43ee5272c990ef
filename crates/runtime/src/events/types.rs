use serde::{Deserialize, Serialize};

/// Encounter and turn flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    EncounterStarted { name: String, hostiles: usize },
    TurnStarted { player_turn: bool, round: u32 },
    EncounterEnded { name: String, victory: bool },
}
