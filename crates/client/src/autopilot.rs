//! Scripted stand-in for a human player.

use tactics_core::{
    CombatConfig, CombatManager, ManagerPhase, StartAbilityError, TargetingIntent, UnitId,
};
use tactics_runtime::{RuntimeError, Session};

/// Casts whatever is ready at the living hostiles and ends the turn once
/// nothing else can be done.
#[derive(Debug)]
pub struct Autopilot {
    approach_distance: f32,
    moved_this_turn: bool,
}

impl Autopilot {
    pub fn new(approach_distance: f32) -> Self {
        Self {
            approach_distance,
            moved_this_turn: false,
        }
    }

    /// Issues at most one input per frame.
    pub fn step(&mut self, session: &mut Session) -> Result<(), RuntimeError> {
        if session.encounter().is_none() {
            return Ok(());
        }
        if !session.director().is_player_turn() {
            // No enemy behavior: the enemy side passes straight back.
            self.moved_this_turn = false;
            return session.start_player_turn();
        }

        if let ManagerPhase::Targeting { slot } = session.manager().phase() {
            return self.aim(session, slot);
        }

        if !self.moved_this_turn {
            self.moved_this_turn = true;
            if self.approach_distance > 0.0 {
                match session.move_player(self.approach_distance) {
                    Ok(_) | Err(RuntimeError::Coin(_)) => {}
                    Err(e) => return Err(e),
                }
                return Ok(());
            }
        }

        let mut waiting = false;
        for slot in 0..CombatConfig::ABILITY_SLOTS {
            match session.press_slot(slot) {
                Ok(()) => return Ok(()),
                Err(RuntimeError::StartAbility(StartAbilityError::OnCooldown { .. })) => {
                    waiting = true;
                }
                Err(RuntimeError::StartAbility(_)) => {}
                Err(e) => return Err(e),
            }
        }

        let out_of_coins = session.roster().player.current_coins() == 0;
        if out_of_coins || (!waiting && session.manager().pending_executions().is_empty()) {
            self.moved_this_turn = false;
            session.end_player_turn()?;
        }
        Ok(())
    }

    fn aim(&self, session: &mut Session, slot: usize) -> Result<(), RuntimeError> {
        let hostiles: Vec<UnitId> = session
            .roster()
            .others()
            .filter(|unit| unit.is_hostile() && !unit.is_dead())
            .map(|unit| unit.id())
            .collect();
        let Some(&first) = hostiles.first() else {
            session.cancel();
            return Ok(());
        };

        let area = session
            .manager()
            .ability(slot)
            .is_some_and(|ability| ability.targeting_type.is_area());
        if area {
            session.targeting_intent(TargetingIntent::DragSelect(hostiles))?;
            session.targeting_intent(TargetingIntent::Confirm)
        } else {
            session.targeting_intent(TargetingIntent::ClickUnit(first))
        }
    }
}
