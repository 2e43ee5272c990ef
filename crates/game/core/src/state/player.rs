use std::fmt;
use std::sync::Arc;

use super::{AdaptiveFlip, Unit, UnitCapabilities, UnitId};
use crate::config::CombatConfig;
use crate::env::{RngOracle, StatModifierPipeline};
use crate::error::{ErrorSeverity, GameError};
use crate::event::{CombatEvent, EventQueue};

/// Rejected coin spend. Player state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoinError {
    #[error("No coins left to spend")]
    Exhausted,
}

impl GameError for CoinError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Exhausted => "COIN_EXHAUSTED",
        }
    }
}

/// Rejected movement. Player state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("Movement distance must be non-negative, got {0}")]
    InvalidDistance(f32),

    #[error("Movement of {requested} exceeds the remaining budget of {remaining}")]
    ExceedsBudget { requested: f32, remaining: f32 },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidDistance(_) => ErrorSeverity::Validation,
            Self::ExceedsBudget { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDistance(_) => "MOVE_INVALID_DISTANCE",
            Self::ExceedsBudget { .. } => "MOVE_EXCEEDS_BUDGET",
        }
    }
}

/// The controllable unit plus its turn economy.
///
/// Owns the coin purse, the adaptive flip and the per-turn movement budget.
/// Derived stats come from the injected [`StatModifierPipeline`] and fall back
/// to [`crate::PlayerDefaults`] when none is wired in.
pub struct Player {
    unit: Unit,
    config: CombatConfig,
    stats: Option<Arc<dyn StatModifierPipeline>>,
    rng: Box<dyn RngOracle>,
    flip: AdaptiveFlip,
    in_combat: bool,
    current_coins: u32,
    bonus_coins_next_turn: u32,
    has_spent_movement_coin: bool,
    distance_moved_this_turn: f32,
}

impl Player {
    pub fn new(
        config: CombatConfig,
        stats: Option<Arc<dyn StatModifierPipeline>>,
        rng: Box<dyn RngOracle>,
    ) -> Self {
        let max_health = stats
            .as_ref()
            .map_or(config.player.max_health, |stats| stats.max_health());

        Self {
            unit: Unit::new(UnitId::PLAYER, "Player", max_health, UnitCapabilities::player()),
            flip: AdaptiveFlip::new(config.flip),
            config,
            stats,
            rng,
            in_combat: false,
            current_coins: 0,
            bonus_coins_next_turn: 0,
            has_spent_movement_coin: false,
            distance_moved_this_turn: 0.0,
        }
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn current_coins(&self) -> u32 {
        self.current_coins
    }

    pub fn bonus_coins_next_turn(&self) -> u32 {
        self.bonus_coins_next_turn
    }

    pub fn flip_chance(&self) -> f32 {
        self.flip.chance()
    }

    pub fn has_spent_movement_coin(&self) -> bool {
        self.has_spent_movement_coin
    }

    pub fn distance_moved_this_turn(&self) -> f32 {
        self.distance_moved_this_turn
    }

    // ========================================================================
    // Derived stats
    // ========================================================================

    pub fn base_coins(&self) -> u32 {
        self.stats
            .as_ref()
            .map_or(self.config.player.base_coins, |stats| stats.base_coins())
    }

    pub fn carryover_cap(&self) -> u32 {
        self.stats
            .as_ref()
            .map_or(self.config.player.carryover_cap, |stats| {
                stats.carryover_coins()
            })
    }

    pub fn max_combat_move_distance(&self) -> f32 {
        self.stats
            .as_ref()
            .map_or(self.config.player.max_combat_move_distance, |stats| {
                stats.max_combat_move_distance()
            })
    }

    // ========================================================================
    // Combat state
    // ========================================================================

    pub fn enter_combat(&mut self, events: &mut EventQueue) {
        if self.in_combat {
            return;
        }
        self.in_combat = true;
        self.unit.set_engaged(true);
        self.reset_flip(events);
        self.current_coins = 0;
        self.bonus_coins_next_turn = 0;
        self.reset_movement();

        events.push(CombatEvent::CoinsChanged { current: 0 });
        events.push(CombatEvent::CombatStateChanged { in_combat: true });
    }

    pub fn exit_combat(&mut self, events: &mut EventQueue) {
        if !self.in_combat {
            return;
        }
        self.in_combat = false;
        self.unit.clear_block(events);
        self.unit.set_engaged(false);
        self.reset_flip(events);
        self.reset_movement();

        events.push(CombatEvent::CombatStateChanged { in_combat: false });
    }

    /// Refills the purse with base coins plus last turn's carry-over.
    pub fn start_turn(&mut self, events: &mut EventQueue) {
        self.current_coins = self.base_coins() + self.bonus_coins_next_turn;
        self.bonus_coins_next_turn = 0;
        self.reset_movement();

        events.push(CombatEvent::CoinsChanged {
            current: self.current_coins,
        });
        events.push(CombatEvent::MovementChanged {
            moved: 0.0,
            max: self.max_combat_move_distance(),
        });
    }

    /// Banks unspent coins for the next turn, up to the carry-over cap.
    pub fn end_turn(&mut self) {
        self.bonus_coins_next_turn = self.current_coins.min(self.carryover_cap());
    }

    // ========================================================================
    // Coins
    // ========================================================================

    pub fn can_spend_coin(&self) -> bool {
        self.current_coins >= 1
    }

    /// Spends one coin and returns the remaining balance.
    pub fn spend_coin(&mut self, events: &mut EventQueue) -> Result<u32, CoinError> {
        if !self.can_spend_coin() {
            return Err(CoinError::Exhausted);
        }
        self.current_coins -= 1;
        events.push(CombatEvent::CoinsChanged {
            current: self.current_coins,
        });
        Ok(self.current_coins)
    }

    /// Charges the once-per-turn movement coin.
    ///
    /// Only the first movement of a combat turn costs a coin. Out of combat
    /// movement is free.
    pub fn spend_movement_coin(&mut self, events: &mut EventQueue) -> Result<(), CoinError> {
        if !self.in_combat || self.has_spent_movement_coin {
            return Ok(());
        }
        self.spend_coin(events)?;
        self.has_spent_movement_coin = true;
        Ok(())
    }

    // ========================================================================
    // Movement
    // ========================================================================

    /// Records movement against this turn's budget.
    pub fn add_movement_distance(
        &mut self,
        distance: f32,
        events: &mut EventQueue,
    ) -> Result<(), MoveError> {
        if !(distance >= 0.0) {
            return Err(MoveError::InvalidDistance(distance));
        }
        if !self.in_combat {
            return Ok(());
        }

        let max = self.max_combat_move_distance();
        if self.distance_moved_this_turn + distance > max + self.config.movement_epsilon {
            return Err(MoveError::ExceedsBudget {
                requested: distance,
                remaining: self.remaining_move_distance(),
            });
        }

        self.distance_moved_this_turn += distance;
        events.push(CombatEvent::MovementChanged {
            moved: self.distance_moved_this_turn,
            max,
        });
        Ok(())
    }

    /// Clamps a requested distance to what this turn still allows.
    pub fn allowed_move_distance(&self, requested: f32) -> f32 {
        let requested = requested.max(0.0);
        if !self.in_combat {
            return requested;
        }
        requested.min(self.remaining_move_distance())
    }

    pub fn remaining_move_distance(&self) -> f32 {
        (self.max_combat_move_distance() - self.distance_moved_this_turn).max(0.0)
    }

    // ========================================================================
    // Flip
    // ========================================================================

    /// Rolls for ability success and adapts the chance for the next flip.
    pub fn perform_coin_flip(&mut self, events: &mut EventQueue) -> bool {
        let roll = self.rng.roll_percent();
        let before = self.flip.chance();
        let hit = self.flip.resolve(roll);
        if self.flip.chance() != before {
            events.push(CombatEvent::FlipChanceChanged {
                chance: self.flip.chance(),
            });
        }
        hit
    }

    /// Resyncs derived max health after the modifier set changed.
    pub fn on_modifiers_changed(&mut self, events: &mut EventQueue) {
        if let Some(stats) = &self.stats {
            let max_health = stats.max_health();
            self.unit.set_max_health(max_health, true, events);
        }
    }

    fn reset_flip(&mut self, events: &mut EventQueue) {
        let before = self.flip.chance();
        self.flip.reset();
        if self.flip.chance() != before {
            events.push(CombatEvent::FlipChanceChanged {
                chance: self.flip.chance(),
            });
        }
    }

    fn reset_movement(&mut self) {
        self.has_spent_movement_coin = false;
        self.distance_moved_this_turn = 0.0;
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("unit", &self.unit)
            .field("in_combat", &self.in_combat)
            .field("current_coins", &self.current_coins)
            .field("bonus_coins_next_turn", &self.bonus_coins_next_turn)
            .field("flip", &self.flip)
            .field("has_spent_movement_coin", &self.has_spent_movement_coin)
            .field("distance_moved_this_turn", &self.distance_moved_this_turn)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerDefaults;
    use crate::env::{FixedRoll, ScriptedRng};
    use crate::stats::{Bonus, ModifierTable, StatKey};

    fn create_test_player() -> Player {
        Player::new(CombatConfig::default(), None, Box::new(FixedRoll::ALWAYS_HIT))
    }

    fn create_combat_player(events: &mut EventQueue) -> Player {
        let mut player = create_test_player();
        player.enter_combat(events);
        player.start_turn(events);
        player
    }

    #[test]
    fn enter_combat_resets_economy_once() {
        let mut player = create_test_player();
        let mut events = EventQueue::new();

        player.enter_combat(&mut events);
        player.enter_combat(&mut events);

        assert!(player.in_combat());
        assert!(player.unit().is_engaged());
        assert_eq!(player.current_coins(), 0);
        assert_eq!(
            events.count(|e| matches!(e, CombatEvent::CombatStateChanged { in_combat: true })),
            1
        );
    }

    #[test]
    fn exit_combat_clears_block_and_flip() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);
        player.unit_mut().add_block(5.0, &mut events);
        player.perform_coin_flip(&mut events);
        assert_eq!(player.flip_chance(), 55.0);

        player.exit_combat(&mut events);

        assert_eq!(player.unit().current_block(), 0.0);
        assert_eq!(player.flip_chance(), 60.0);
        assert!(!player.unit().is_engaged());
    }

    #[test]
    fn start_turn_adds_carryover_to_base() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);
        assert_eq!(player.current_coins(), 3);

        player.end_turn();
        assert_eq!(player.bonus_coins_next_turn(), 1);

        player.start_turn(&mut events);
        assert_eq!(player.current_coins(), 4);
        assert_eq!(player.bonus_coins_next_turn(), 0);
    }

    #[test]
    fn end_turn_with_empty_purse_carries_nothing() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);
        for _ in 0..3 {
            player.spend_coin(&mut events).unwrap();
        }

        player.end_turn();

        assert_eq!(player.bonus_coins_next_turn(), 0);
    }

    #[test]
    fn spend_coin_fails_without_mutation_when_empty() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);
        player.current_coins = 1;

        assert_eq!(player.spend_coin(&mut events), Ok(0));
        assert!(!player.can_spend_coin());
        assert_eq!(player.spend_coin(&mut events), Err(CoinError::Exhausted));
        assert_eq!(player.current_coins(), 0);
    }

    #[test]
    fn movement_coin_is_charged_once_per_turn() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);

        player.spend_movement_coin(&mut events).unwrap();
        player.spend_movement_coin(&mut events).unwrap();
        assert_eq!(player.current_coins(), 2);

        player.start_turn(&mut events);
        assert!(!player.has_spent_movement_coin());
    }

    #[test]
    fn movement_coin_requires_a_coin_in_combat_only() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);
        player.current_coins = 0;

        assert_eq!(
            player.spend_movement_coin(&mut events),
            Err(CoinError::Exhausted)
        );
        assert!(!player.has_spent_movement_coin());

        let mut idle = create_test_player();
        assert_eq!(idle.spend_movement_coin(&mut events), Ok(()));
    }

    #[test]
    fn movement_budget_allows_epsilon_slack() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);

        player.add_movement_distance(6.0, &mut events).unwrap();
        player.add_movement_distance(4.0, &mut events).unwrap();
        player.add_movement_distance(0.005, &mut events).unwrap();

        let err = player.add_movement_distance(0.01, &mut events).unwrap_err();
        assert!(matches!(err, MoveError::ExceedsBudget { .. }));
        assert!((player.distance_moved_this_turn() - 10.005).abs() < 1e-4);
    }

    #[test]
    fn movement_just_over_epsilon_is_rejected() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);

        assert!(player.add_movement_distance(10.02, &mut events).is_err());
        assert_eq!(player.distance_moved_this_turn(), 0.0);
        assert!(player.add_movement_distance(10.0, &mut events).is_ok());
    }

    #[test]
    fn negative_movement_is_rejected() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);

        assert_eq!(
            player.add_movement_distance(-1.0, &mut events),
            Err(MoveError::InvalidDistance(-1.0))
        );
    }

    #[test]
    fn allowed_distance_clamps_without_mutation() {
        let mut events = EventQueue::new();
        let mut player = create_combat_player(&mut events);
        player.add_movement_distance(7.5, &mut events).unwrap();

        assert_eq!(player.allowed_move_distance(5.0), 2.5);
        assert_eq!(player.allowed_move_distance(1.0), 1.0);
        assert_eq!(player.distance_moved_this_turn(), 7.5);

        let idle = create_test_player();
        assert_eq!(idle.allowed_move_distance(50.0), 50.0);
    }

    #[test]
    fn coin_flip_follows_rng_and_adapts() {
        let mut player = Player::new(
            CombatConfig::default(),
            None,
            Box::new(ScriptedRng::new([10.0, 10.0, 10.0, 99.0])),
        );
        let mut events = EventQueue::new();

        let results: Vec<bool> = (0..4).map(|_| player.perform_coin_flip(&mut events)).collect();

        assert_eq!(results, vec![true, true, true, false]);
        assert_eq!(player.flip_chance(), 60.0);
        assert_eq!(
            events.count(|e| matches!(e, CombatEvent::FlipChanceChanged { .. })),
            4
        );
    }

    #[test]
    fn derived_stats_come_from_pipeline_when_present() {
        let table = Arc::new(ModifierTable::new(PlayerDefaults::default()));
        table.add(StatKey::BaseCoins, Bonus::flat(2.0));
        table.add(StatKey::CarryoverCoins, Bonus::flat(1.0));
        let player = Player::new(
            CombatConfig::default(),
            Some(table),
            Box::new(FixedRoll::ALWAYS_HIT),
        );

        assert_eq!(player.base_coins(), 5);
        assert_eq!(player.carryover_cap(), 2);
    }

    #[test]
    fn modifiers_changed_resyncs_max_health() {
        let table = Arc::new(ModifierTable::new(PlayerDefaults::default()));
        let mut player = Player::new(
            CombatConfig::default(),
            Some(table.clone()),
            Box::new(FixedRoll::ALWAYS_HIT),
        );
        let mut events = EventQueue::new();

        table.add(StatKey::MaxHealth, Bonus::less(50.0));
        player.on_modifiers_changed(&mut events);

        assert_eq!(player.unit().max_health(), 50.0);
        assert_eq!(player.unit().current_health(), 50.0);
    }
}
