//! Ability orchestration.
//!
//! [`PlayerAbilityManager`] maps input slots to equipped abilities, gates
//! casts on cooldown, turn and coins, drives the targeting subsystem and
//! sequences immediate or delayed effect execution.
//!
//! ```text
//! Idle ──try_start_ability──▶ Targeting ──confirmed──▶ Resolving ──hit──▶ Executing ──▶ Idle
//!                                 │                        │                 │
//!                                 └──cancelled──▶ Idle     └──miss──▶ Idle   └──delayed──▶ scheduler
//! ```
//!
//! Resolution and immediate execution complete inside a single update, so only
//! `Idle` and `Targeting` are observable as [`ManagerPhase`]s. Delayed chains
//! live in the [`EffectScheduler`] until their fire time.

mod cooldown;
mod errors;
mod scheduler;

pub use cooldown::CooldownTimers;
pub use errors::{SlotError, StartAbilityError};
pub use scheduler::{EffectScheduler, PendingExecution};

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::ability::{
    Ability, AbilityTargeting, ExecutionReport, TargetingNotification, TargetingResult,
    execute_ability,
};
use crate::config::{CombatConfig, DelayedEffectPolicy};
use crate::env::{CombatManager, CombatNotification, NarrationSink, StatModifierPipeline, messages};
use crate::event::CombatEvent;
use crate::state::{Roster, UnitId};

/// Observable manager state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ManagerPhase {
    #[default]
    Idle,
    Targeting {
        slot: usize,
    },
}

/// How a confirmed cast (or a delayed chain firing) played out.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastOutcome {
    /// The coin could not be spent at confirmation time. No cooldown started.
    Aborted { slot: usize },
    /// The flip failed. Coin and cooldown were consumed.
    Missed { slot: usize },
    /// The chain waits in the scheduler until `fire_at`.
    Scheduled { slot: usize, fire_at: f64 },
    /// The chain ran.
    Executed(ExecutionReport),
}

/// Orchestrates the player's three ability slots.
pub struct PlayerAbilityManager {
    config: CombatConfig,
    slots: [Option<Arc<Ability>>; CombatConfig::ABILITY_SLOTS],
    cooldowns: CooldownTimers,
    scheduler: EffectScheduler,
    phase: ManagerPhase,
    targeting_locked: bool,
    /// Seconds elapsed across all updates.
    clock: f64,
    combat: Arc<dyn CombatManager>,
    stats: Option<Arc<dyn StatModifierPipeline>>,
    targeting: Box<dyn AbilityTargeting>,
    narration: Arc<dyn NarrationSink>,
}

impl PlayerAbilityManager {
    pub fn new(
        config: CombatConfig,
        combat: Arc<dyn CombatManager>,
        stats: Option<Arc<dyn StatModifierPipeline>>,
        targeting: Box<dyn AbilityTargeting>,
        narration: Arc<dyn NarrationSink>,
    ) -> Self {
        Self {
            config,
            slots: Default::default(),
            cooldowns: CooldownTimers::new(),
            scheduler: EffectScheduler::new(),
            phase: ManagerPhase::Idle,
            targeting_locked: false,
            clock: 0.0,
            combat,
            stats,
            targeting,
            narration,
        }
    }

    // ========================================================================
    // Slots
    // ========================================================================

    /// Puts `ability` into `slot` and returns what was there before.
    pub fn equip(
        &mut self,
        slot: usize,
        ability: impl Into<Arc<Ability>>,
    ) -> Result<Option<Arc<Ability>>, SlotError> {
        self.check_slot_mutable(slot)?;
        Ok(self.slots[slot].replace(ability.into()))
    }

    pub fn unequip(&mut self, slot: usize) -> Result<Option<Arc<Ability>>, SlotError> {
        self.check_slot_mutable(slot)?;
        Ok(self.slots[slot].take())
    }

    pub fn ability(&self, slot: usize) -> Option<&Arc<Ability>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots in slot order.
    pub fn equipped(&self) -> ArrayVec<(usize, &Arc<Ability>), { CombatConfig::ABILITY_SLOTS }> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, ability)| ability.as_ref().map(|ability| (slot, ability)))
            .collect()
    }

    fn check_slot_mutable(&self, slot: usize) -> Result<(), SlotError> {
        if slot >= self.slots.len() {
            return Err(SlotError::OutOfRange { slot });
        }
        if self.phase == (ManagerPhase::Targeting { slot }) {
            return Err(SlotError::Busy { slot });
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn phase(&self) -> ManagerPhase {
        self.phase
    }

    pub fn is_targeting(&self) -> bool {
        matches!(self.phase, ManagerPhase::Targeting { .. })
    }

    pub fn is_targeting_locked(&self) -> bool {
        self.targeting_locked
    }

    pub fn cooldown_remaining(&self, slot: usize) -> f32 {
        self.cooldowns.remaining(slot)
    }

    pub fn cooldowns(&self) -> &CooldownTimers {
        &self.cooldowns
    }

    pub fn pending_executions(&self) -> &EffectScheduler {
        &self.scheduler
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Validates gating for `slot` and starts targeting on success.
    pub fn try_start_ability(
        &mut self,
        slot: usize,
        roster: &mut Roster,
    ) -> Result<(), StartAbilityError> {
        if let ManagerPhase::Targeting { slot: active } = self.phase {
            return Err(StartAbilityError::AlreadyTargeting { active });
        }
        if slot >= self.slots.len() {
            return Err(StartAbilityError::InvalidSlot { slot });
        }
        let ability = self.slots[slot]
            .clone()
            .ok_or(StartAbilityError::EmptySlot { slot })?;
        let remaining = self.cooldowns.remaining(slot);
        if remaining > 0.0 {
            return Err(StartAbilityError::OnCooldown { slot, remaining });
        }
        if self.targeting_locked {
            return Err(StartAbilityError::TargetingLocked);
        }
        if self.combat.in_combat() {
            if !self.combat.is_player_turn() {
                return Err(StartAbilityError::NotPlayerTurn);
            }
            if !roster.player.can_spend_coin() {
                return Err(StartAbilityError::InsufficientCoins);
            }
        }

        self.phase = ManagerPhase::Targeting { slot };
        self.targeting.start_targeting(&ability, UnitId::PLAYER);
        roster.events.push(CombatEvent::TargetingStarted { slot });
        Ok(())
    }

    /// Abandons the active targeting session, if any.
    pub fn cancel(&mut self, roster: &mut Roster) {
        if self.is_targeting() {
            self.targeting.cancel_targeting();
            self.on_targeting_cancelled(roster);
        }
    }

    /// Cancels targeting and refuses new casts until the player's next turn
    /// starts or combat ends.
    pub fn lock_targeting(&mut self, roster: &mut Roster) {
        self.cancel(roster);
        self.targeting_locked = true;
    }

    pub fn handle_combat_notification(
        &mut self,
        notification: CombatNotification,
        roster: &mut Roster,
    ) {
        match notification {
            CombatNotification::TurnStarted { player_turn } => {
                if player_turn {
                    self.targeting_locked = false;
                }
            }
            CombatNotification::CombatEnded => {
                self.targeting_locked = false;
                if self.config.delayed_effects == DelayedEffectPolicy::DropOnCombatEnd {
                    let count = self.scheduler.clear();
                    if count > 0 {
                        roster.events.push(CombatEvent::DelayedEffectsDropped { count });
                    }
                }
            }
        }
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Advances the manager by `dt` seconds.
    ///
    /// Cooldowns decay, targeting outcomes are consumed and due delayed chains
    /// run. Returns every cast that resolved or fired during the update.
    pub fn update(&mut self, dt: f32, roster: &mut Roster) -> Vec<CastOutcome> {
        let dt = dt.max(0.0);
        self.clock += f64::from(dt);
        self.cooldowns.tick(dt);

        let mut outcomes = Vec::new();
        while let Some(notification) = self.targeting.poll_notification() {
            match notification {
                TargetingNotification::Confirmed(result) => {
                    if let Some(outcome) = self.on_target_confirmed(result, roster) {
                        outcomes.push(outcome);
                    }
                }
                TargetingNotification::Cancelled => self.on_targeting_cancelled(roster),
            }
        }

        for pending in self.scheduler.take_due(self.clock) {
            let report = self.run_chain(&pending.ability, &pending.targets, roster);
            outcomes.push(CastOutcome::Executed(report));
        }

        outcomes
    }

    /// Resolves a confirmed target: coin, cooldown, flip, then execution.
    ///
    /// Returns `None` when no targeting session was active.
    pub fn on_target_confirmed(
        &mut self,
        targets: TargetingResult,
        roster: &mut Roster,
    ) -> Option<CastOutcome> {
        let ManagerPhase::Targeting { slot } = self.phase else {
            return None;
        };
        self.phase = ManagerPhase::Idle;
        let ability = self.slots[slot].clone()?;

        if self.combat.in_combat() {
            if roster.player.spend_coin(&mut roster.events).is_err() {
                roster.events.push(CombatEvent::AbilityAborted {
                    slot,
                    ability: ability.name.clone(),
                });
                return Some(CastOutcome::Aborted { slot });
            }
            self.start_cooldown(slot, roster);

            if !roster.player.perform_coin_flip(&mut roster.events) {
                self.narration.narrate(messages::missed(&ability.name));
                roster.events.push(CombatEvent::AbilityMissed {
                    slot,
                    ability: ability.name.clone(),
                });
                return Some(CastOutcome::Missed { slot });
            }
        } else {
            self.start_cooldown(slot, roster);
        }

        if ability.is_delayed() {
            let fire_at = self.clock + f64::from(ability.delay());
            roster.events.push(CombatEvent::AbilityScheduled {
                slot,
                ability: ability.name.clone(),
                fire_at,
            });
            self.scheduler.schedule(PendingExecution {
                slot,
                ability,
                targets,
                fire_at,
            });
            return Some(CastOutcome::Scheduled { slot, fire_at });
        }

        let report = self.run_chain(&ability, &targets, roster);
        Some(CastOutcome::Executed(report))
    }

    /// Returns to idle without touching coins or cooldowns.
    pub fn on_targeting_cancelled(&mut self, roster: &mut Roster) {
        if let ManagerPhase::Targeting { slot } = self.phase {
            self.phase = ManagerPhase::Idle;
            roster.events.push(CombatEvent::TargetingCancelled { slot });
        }
    }

    fn start_cooldown(&mut self, slot: usize, roster: &mut Roster) {
        let duration = self.config.ability_cooldown;
        self.cooldowns.start(slot, duration);
        roster.events.push(CombatEvent::CooldownStarted { slot, duration });
    }

    fn run_chain(
        &self,
        ability: &Ability,
        targets: &TargetingResult,
        roster: &mut Roster,
    ) -> ExecutionReport {
        let report = execute_ability(
            ability,
            UnitId::PLAYER,
            targets,
            roster,
            self.stats.as_deref(),
            self.narration.as_ref(),
        );
        roster.events.push(CombatEvent::AbilityExecuted {
            ability: report.ability.clone(),
            enemy_was_hit: report.enemy_was_hit,
        });
        report
    }
}

impl fmt::Debug for PlayerAbilityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerAbilityManager")
            .field("slots", &self.slots)
            .field("cooldowns", &self.cooldowns)
            .field("scheduler", &self.scheduler)
            .field("phase", &self.phase)
            .field("targeting_locked", &self.targeting_locked)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ability::{AbilityEffect, IntentTargeting, TargetingIntent, TargetingType};
    use crate::config::PlayerDefaults;
    use crate::env::{CombatFlags, FixedRoll, MessageQueue, RngOracle};
    use crate::state::Player;
    use crate::stats::{Bonus, ModifierTable, StatKey};

    struct Harness {
        manager: PlayerAbilityManager,
        roster: Roster,
        flags: Arc<CombatFlags>,
        input: Arc<Mutex<IntentTargeting>>,
        narration: Arc<MessageQueue>,
        goblin: UnitId,
    }

    impl Harness {
        fn click(&self, target: UnitId) {
            self.input
                .lock()
                .unwrap()
                .submit(TargetingIntent::ClickUnit(target))
                .unwrap();
        }

        fn cast_at(&mut self, slot: usize, target: UnitId) -> Vec<CastOutcome> {
            self.manager
                .try_start_ability(slot, &mut self.roster)
                .unwrap();
            self.click(target);
            self.manager.update(0.0, &mut self.roster)
        }

        fn goblin_health(&self) -> f32 {
            self.roster.unit(self.goblin).unwrap().current_health()
        }
    }

    fn create_harness(
        config: CombatConfig,
        rng: impl RngOracle + 'static,
        in_combat: bool,
    ) -> Harness {
        let flags = Arc::new(if in_combat {
            CombatFlags::player_turn()
        } else {
            CombatFlags::new()
        });
        let input = Arc::new(Mutex::new(IntentTargeting::new()));
        let narration = Arc::new(MessageQueue::new());
        let manager = PlayerAbilityManager::new(
            config.clone(),
            flags.clone(),
            None,
            Box::new(input.clone()),
            narration.clone(),
        );
        let mut roster = Roster::new(Player::new(config, None, Box::new(rng)));
        if in_combat {
            roster.player.enter_combat(&mut roster.events);
            roster.player.start_turn(&mut roster.events);
        }
        let goblin = roster.spawn_enemy("Goblin", 50.0);

        Harness {
            manager,
            roster,
            flags,
            input,
            narration,
            goblin,
        }
    }

    fn firebolt() -> Ability {
        Ability::new("Firebolt", TargetingType::PointAndClick)
            .with_effect(AbilityEffect::damage(10.0))
    }

    #[test]
    fn forced_hit_in_combat_deals_exact_damage() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();

        let outcomes = h.cast_at(0, h.goblin);

        let [CastOutcome::Executed(report)] = outcomes.as_slice() else {
            panic!("expected a single execution, got {outcomes:?}");
        };
        assert!(report.enemy_was_hit);
        assert_eq!(h.goblin_health(), 40.0);
        assert_eq!(h.roster.player.current_coins(), 2);
        assert_eq!(h.manager.phase(), ManagerPhase::Idle);
    }

    #[test]
    fn out_of_combat_cast_skips_coin_and_flip() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_MISS, false);
        h.manager.equip(0, firebolt()).unwrap();

        let outcomes = h.cast_at(0, h.goblin);

        assert!(matches!(outcomes.as_slice(), [CastOutcome::Executed(_)]));
        assert_eq!(h.goblin_health(), 40.0);
        assert_eq!(h.roster.player.current_coins(), 0);
        assert_eq!(h.roster.player.flip_chance(), 60.0);
    }

    #[test]
    fn miss_consumes_coin_and_starts_cooldown() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_MISS, true);
        h.manager.equip(0, firebolt()).unwrap();

        let outcomes = h.cast_at(0, h.goblin);

        assert_eq!(outcomes, vec![CastOutcome::Missed { slot: 0 }]);
        assert_eq!(h.goblin_health(), 50.0);
        assert_eq!(h.roster.player.current_coins(), 2);
        assert_eq!(h.manager.cooldown_remaining(0), 2.0);
        assert_eq!(h.narration.drain(), vec!["You missed Firebolt.".to_string()]);
        assert_eq!(
            h.manager.try_start_ability(0, &mut h.roster),
            Err(StartAbilityError::OnCooldown {
                slot: 0,
                remaining: 2.0
            })
        );
    }

    #[test]
    fn slot_is_usable_once_cooldown_elapses() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();
        h.cast_at(0, h.goblin);

        h.manager.update(1.5, &mut h.roster);
        assert!(h.manager.try_start_ability(0, &mut h.roster).is_err());

        h.manager.update(0.5, &mut h.roster);
        assert_eq!(h.manager.try_start_ability(0, &mut h.roster), Ok(()));
    }

    #[test]
    fn gating_rejections_leave_state_untouched() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();

        assert_eq!(
            h.manager.try_start_ability(7, &mut h.roster),
            Err(StartAbilityError::InvalidSlot { slot: 7 })
        );
        assert_eq!(
            h.manager.try_start_ability(1, &mut h.roster),
            Err(StartAbilityError::EmptySlot { slot: 1 })
        );

        h.flags.set_player_turn(false);
        assert_eq!(
            h.manager.try_start_ability(0, &mut h.roster),
            Err(StartAbilityError::NotPlayerTurn)
        );

        h.flags.set_player_turn(true);
        for _ in 0..3 {
            h.roster.player.spend_coin(&mut h.roster.events).unwrap();
        }
        assert_eq!(
            h.manager.try_start_ability(0, &mut h.roster),
            Err(StartAbilityError::InsufficientCoins)
        );

        assert_eq!(h.manager.phase(), ManagerPhase::Idle);
        assert!(!h.input.lock().unwrap().is_targeting());
    }

    #[test]
    fn equip_replaces_and_lists_slots() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, false);

        assert_eq!(h.manager.equip(2, firebolt()), Ok(None));
        let previous = h.manager.equip(2, firebolt().with_delay(1.0)).unwrap();

        assert_eq!(previous.map(|a| a.effect_delay), Some(0.0));
        assert_eq!(h.manager.equip(3, firebolt()), Err(SlotError::OutOfRange { slot: 3 }));
        let equipped: Vec<usize> = h.manager.equipped().iter().map(|(slot, _)| *slot).collect();
        assert_eq!(equipped, vec![2]);
    }

    #[test]
    fn only_one_slot_targets_at_a_time() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();
        h.manager.equip(1, firebolt()).unwrap();

        h.manager.try_start_ability(0, &mut h.roster).unwrap();

        assert_eq!(
            h.manager.try_start_ability(1, &mut h.roster),
            Err(StartAbilityError::AlreadyTargeting { active: 0 })
        );
        assert_eq!(h.manager.unequip(0), Err(SlotError::Busy { slot: 0 }));
    }

    #[test]
    fn cancel_has_no_side_effects() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();
        h.manager.try_start_ability(0, &mut h.roster).unwrap();

        h.input
            .lock()
            .unwrap()
            .submit(TargetingIntent::Cancel)
            .unwrap();
        let outcomes = h.manager.update(0.1, &mut h.roster);

        assert!(outcomes.is_empty());
        assert_eq!(h.manager.phase(), ManagerPhase::Idle);
        assert_eq!(h.manager.cooldown_remaining(0), 0.0);
        assert_eq!(h.roster.player.current_coins(), 3);
        assert_eq!(h.roster.player.flip_chance(), 60.0);
        assert_eq!(
            h.roster
                .events
                .count(|e| matches!(e, CombatEvent::TargetingCancelled { slot: 0 })),
            1
        );
    }

    #[test]
    fn coin_lost_before_confirmation_aborts_without_cooldown() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();
        h.manager.try_start_ability(0, &mut h.roster).unwrap();
        for _ in 0..3 {
            h.roster.player.spend_coin(&mut h.roster.events).unwrap();
        }

        h.click(h.goblin);
        let outcomes = h.manager.update(0.0, &mut h.roster);

        assert_eq!(outcomes, vec![CastOutcome::Aborted { slot: 0 }]);
        assert_eq!(h.manager.cooldown_remaining(0), 0.0);
        assert_eq!(h.goblin_health(), 50.0);
    }

    #[test]
    fn delayed_chain_fires_only_after_delay() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt().with_delay(1.0)).unwrap();

        let outcomes = h.cast_at(0, h.goblin);
        assert_eq!(
            outcomes,
            vec![CastOutcome::Scheduled {
                slot: 0,
                fire_at: 1.0
            }]
        );
        assert_eq!(h.manager.pending_executions().len(), 1);

        assert!(h.manager.update(0.5, &mut h.roster).is_empty());
        assert_eq!(h.goblin_health(), 50.0);

        let outcomes = h.manager.update(0.5, &mut h.roster);
        assert!(matches!(outcomes.as_slice(), [CastOutcome::Executed(_)]));
        assert_eq!(h.goblin_health(), 40.0);
        assert!(h.manager.pending_executions().is_empty());
    }

    #[test]
    fn delayed_chain_survives_combat_end_by_default() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt().with_delay(1.0)).unwrap();
        h.cast_at(0, h.goblin);

        h.flags.set_in_combat(false);
        h.manager
            .handle_combat_notification(CombatNotification::CombatEnded, &mut h.roster);
        h.manager.update(1.0, &mut h.roster);

        assert_eq!(h.goblin_health(), 40.0);
    }

    #[test]
    fn drop_policy_discards_pending_chains() {
        let config =
            CombatConfig::default().with_delayed_effects(DelayedEffectPolicy::DropOnCombatEnd);
        let mut h = create_harness(config, FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt().with_delay(1.0)).unwrap();
        h.cast_at(0, h.goblin);

        h.manager
            .handle_combat_notification(CombatNotification::CombatEnded, &mut h.roster);
        let outcomes = h.manager.update(2.0, &mut h.roster);

        assert!(outcomes.is_empty());
        assert_eq!(h.goblin_health(), 50.0);
        assert_eq!(
            h.roster
                .events
                .count(|e| matches!(e, CombatEvent::DelayedEffectsDropped { count: 1 })),
            1
        );
    }

    #[test]
    fn locked_targeting_unlocks_on_player_turn_start() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.equip(0, firebolt()).unwrap();
        h.manager.try_start_ability(0, &mut h.roster).unwrap();

        h.manager.lock_targeting(&mut h.roster);

        assert_eq!(h.manager.phase(), ManagerPhase::Idle);
        assert!(!h.input.lock().unwrap().is_targeting());
        assert_eq!(
            h.manager.try_start_ability(0, &mut h.roster),
            Err(StartAbilityError::TargetingLocked)
        );

        h.manager.handle_combat_notification(
            CombatNotification::TurnStarted { player_turn: false },
            &mut h.roster,
        );
        assert!(h.manager.is_targeting_locked());

        h.manager.handle_combat_notification(
            CombatNotification::TurnStarted { player_turn: true },
            &mut h.roster,
        );
        assert!(!h.manager.is_targeting_locked());
        assert_eq!(h.manager.try_start_ability(0, &mut h.roster), Ok(()));
    }

    #[test]
    fn combat_end_releases_targeting_lock() {
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.lock_targeting(&mut h.roster);

        h.manager
            .handle_combat_notification(CombatNotification::CombatEnded, &mut h.roster);

        assert!(!h.manager.is_targeting_locked());
    }

    #[test]
    fn stat_pipeline_feeds_effect_magnitudes() {
        let table = Arc::new(ModifierTable::new(PlayerDefaults::default()));
        table.add(StatKey::Damage, Bonus::increased(50.0));
        let mut h = create_harness(CombatConfig::default(), FixedRoll::ALWAYS_HIT, true);
        h.manager.stats = Some(table);
        h.manager.equip(0, firebolt()).unwrap();

        h.cast_at(0, h.goblin);

        assert_eq!(h.goblin_health(), 35.0);
    }
}
