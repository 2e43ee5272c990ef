//! Frame-driven combat session.
//!
//! [`Session`] owns the roster, the ability manager and the collaborators the
//! rules read from. Hosts call the input methods as the player acts and
//! [`Session::tick`] once per frame; every state change raised during a tick
//! is forwarded to the [`EventBus`].
use std::sync::{Arc, Mutex, PoisonError};

use tactics_content::{AbilityCatalog, Encounter, Loadout};
use tactics_core::{
    Ability, AbilityTargeting, CastOutcome, CombatConfig, CombatManager, CombatNotification,
    DelayedEffectPolicy, IntentTargeting, MessageQueue, ModifierEntry, ModifierTable, MoveError,
    NarrationSink, PcgRng, Player, PlayerAbilityManager, RngOracle, Roster, StatModifierPipeline,
    TargetingIntent,
};

use crate::config::RuntimeConfig;
use crate::director::CombatDirector;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic, TurnEvent};
use crate::rng::StdRngOracle;

type Slots = [Option<Arc<Ability>>; CombatConfig::ABILITY_SLOTS];

/// Combat session for the local player.
pub struct Session {
    config: RuntimeConfig,
    roster: Roster,
    manager: PlayerAbilityManager,
    director: Arc<CombatDirector>,
    targeting: Arc<Mutex<IntentTargeting>>,
    narration: Arc<MessageQueue>,
    stats: Option<Arc<ModifierTable>>,
    stats_revision: u64,
    bus: EventBus,
    encounter: Option<String>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    // ========================================================================
    // Encounter flow
    // ========================================================================

    /// Spawns the encounter's units, enters combat and opens the first
    /// player turn.
    pub fn begin_encounter(&mut self, encounter: &Encounter) -> Result<()> {
        if self.encounter.is_some() {
            return Err(RuntimeError::EncounterActive);
        }

        for enemy in &encounter.enemies {
            let id = if enemy.prop {
                self.roster.spawn_prop(enemy.name.clone(), enemy.max_health)
            } else {
                self.roster.spawn_enemy(enemy.name.clone(), enemy.max_health)
            };
            tracing::debug!("Spawned {} as {}", enemy.name, id);
        }

        self.roster.player.enter_combat(&mut self.roster.events);
        self.director.start();
        self.encounter = Some(encounter.name.clone());

        tracing::info!(
            "Encounter '{}' started with {} hostiles",
            encounter.name,
            self.roster.hostiles_remaining()
        );
        self.bus.publish(Event::Turn(TurnEvent::EncounterStarted {
            name: encounter.name.clone(),
            hostiles: self.roster.hostiles_remaining(),
        }));

        self.start_player_turn()
    }

    /// Clears the player's block, refills coins and hands them the turn.
    pub fn start_player_turn(&mut self) -> Result<()> {
        if self.encounter.is_none() {
            return Err(RuntimeError::NoEncounter);
        }

        self.roster
            .player
            .unit_mut()
            .clear_block(&mut self.roster.events);
        let notification = self.director.begin_turn(true);
        self.roster.player.start_turn(&mut self.roster.events);
        self.notify_manager(notification);

        let round = self.director.round();
        tracing::info!(
            "Round {}: player turn with {} coins",
            round,
            self.roster.player.current_coins()
        );
        self.bus.publish(Event::Turn(TurnEvent::TurnStarted {
            player_turn: true,
            round,
        }));
        Ok(())
    }

    /// Banks unspent coins, locks targeting and passes the turn to the enemy
    /// side.
    pub fn end_player_turn(&mut self) -> Result<()> {
        if self.encounter.is_none() {
            return Err(RuntimeError::NoEncounter);
        }
        if !self.director.is_player_turn() {
            return Err(RuntimeError::NotPlayerTurn);
        }

        self.roster.player.end_turn();
        self.manager.lock_targeting(&mut self.roster);
        let notification = self.director.begin_turn(false);
        self.notify_manager(notification);

        tracing::info!(
            "Player turn ended, {} coins carried over",
            self.roster.player.bonus_coins_next_turn()
        );
        self.bus.publish(Event::Turn(TurnEvent::TurnStarted {
            player_turn: false,
            round: self.director.round(),
        }));
        Ok(())
    }

    fn end_encounter(&mut self, victory: bool) {
        let Some(name) = self.encounter.take() else {
            return;
        };

        self.roster.player.exit_combat(&mut self.roster.events);
        let pending = self.manager.pending_executions().len();
        let notification = self.director.end();
        self.notify_manager(notification);
        if pending > 0 && self.config.combat.delayed_effects == DelayedEffectPolicy::DropOnCombatEnd
        {
            tracing::warn!("Dropped {} delayed effects at end of '{}'", pending, name);
        }

        tracing::info!("Encounter '{}' ended (victory: {})", name, victory);
        self.bus
            .publish(Event::Turn(TurnEvent::EncounterEnded { name, victory }));
    }

    fn notify_manager(&mut self, notification: CombatNotification) {
        self.manager
            .handle_combat_notification(notification, &mut self.roster);
    }

    // ========================================================================
    // Player input
    // ========================================================================

    /// Starts targeting with the ability in `slot`.
    pub fn press_slot(&mut self, slot: usize) -> Result<()> {
        self.manager
            .try_start_ability(slot, &mut self.roster)
            .map_err(|e| {
                tracing::debug!("Slot {} rejected: {}", slot, e);
                RuntimeError::from(e)
            })
    }

    pub fn cancel(&mut self) {
        self.manager.cancel(&mut self.roster);
    }

    /// Feeds player input to the active targeting session. The outcome is
    /// picked up on the next [`Self::tick`].
    pub fn targeting_intent(&mut self, intent: TargetingIntent) -> Result<()> {
        self.targeting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .submit(intent)
            .map_err(RuntimeError::from)
    }

    /// Moves the player up to `distance` and returns how far they actually
    /// went.
    ///
    /// In combat the first move of a turn costs a coin and the distance is
    /// clamped to what remains of the turn's budget.
    pub fn move_player(&mut self, distance: f32) -> Result<f32> {
        if !(distance >= 0.0) {
            return Err(MoveError::InvalidDistance(distance).into());
        }
        if distance == 0.0 {
            return Ok(0.0);
        }
        if self.encounter.is_some() && !self.director.is_player_turn() {
            return Err(RuntimeError::NotPlayerTurn);
        }

        let player = &mut self.roster.player;
        player.spend_movement_coin(&mut self.roster.events)?;
        let allowed = player.allowed_move_distance(distance);
        player.add_movement_distance(allowed, &mut self.roster.events)?;

        tracing::debug!(
            "Player moved {:.2} of {:.2} requested ({:.2} left)",
            allowed,
            distance,
            player.remaining_move_distance()
        );
        Ok(allowed)
    }

    /// Swaps the ability in `slot`.
    pub fn equip(&mut self, slot: usize, ability: Arc<Ability>) -> Result<Option<Arc<Ability>>> {
        Ok(self.manager.equip(slot, ability)?)
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Advances the session by `dt` seconds and publishes what changed.
    pub fn tick(&mut self, dt: f32) -> Vec<CastOutcome> {
        let outcomes = self.manager.update(dt, &mut self.roster);
        for outcome in &outcomes {
            log_outcome(outcome);
        }

        self.resync_modifiers();

        let swept = self.roster.sweep_despawned();
        if !swept.is_empty() {
            tracing::debug!("Removed {} despawned units", swept.len());
        }

        if self.encounter.is_some() {
            if self.roster.player.unit().is_dead() {
                self.end_encounter(false);
            } else if self.roster.hostiles_remaining() == 0 {
                self.end_encounter(true);
            }
        }

        self.flush();
        outcomes
    }

    fn resync_modifiers(&mut self) {
        let Some(stats) = &self.stats else {
            return;
        };
        let revision = stats.revision();
        if revision != self.stats_revision {
            self.stats_revision = revision;
            self.roster
                .player
                .on_modifiers_changed(&mut self.roster.events);
            tracing::debug!("Modifiers changed (revision {})", revision);
        }
    }

    fn flush(&mut self) {
        for event in self.roster.events.drain() {
            self.bus.publish(Event::Combat(event));
        }
        for line in self.narration.drain() {
            tracing::info!(target: "narration", "{}", line);
            self.bus.publish(Event::Narration(line));
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn manager(&self) -> &PlayerAbilityManager {
        &self.manager
    }

    pub fn director(&self) -> &CombatDirector {
        &self.director
    }

    pub fn stats(&self) -> Option<&Arc<ModifierTable>> {
        self.stats.as_ref()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn encounter(&self) -> Option<&str> {
        self.encounter.as_deref()
    }

    pub fn is_targeting(&self) -> bool {
        self.manager.is_targeting()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("encounter", &self.encounter)
            .field("roster", &self.roster)
            .field("manager", &self.manager)
            .field("director", &self.director)
            .finish_non_exhaustive()
    }
}

fn log_outcome(outcome: &CastOutcome) {
    match outcome {
        CastOutcome::Aborted { slot } => {
            tracing::debug!("Slot {} aborted: no coin left at confirmation", slot)
        }
        CastOutcome::Missed { slot } => tracing::debug!("Slot {} missed its coin flip", slot),
        CastOutcome::Scheduled { slot, fire_at } => {
            tracing::debug!("Slot {} scheduled to fire at {:.2}s", slot, fire_at)
        }
        CastOutcome::Executed(report) => tracing::debug!(
            "{} executed with {} applied effects (enemy hit: {})",
            report.ability,
            report.applied.len(),
            report.enemy_was_hit
        ),
    }
}

fn default_rng(seed: Option<u64>) -> Box<dyn RngOracle> {
    match seed {
        Some(seed) => Box::new(PcgRng::new(seed)),
        None => Box::new(StdRngOracle::from_entropy()),
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    stats: Option<Arc<ModifierTable>>,
    modifiers: Vec<ModifierEntry>,
    rng: Option<Box<dyn RngOracle>>,
    slots: Slots,
    bus: Option<EventBus>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            stats: None,
            modifiers: Vec::new(),
            rng: None,
            slots: Default::default(),
            bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing modifier table with the session.
    pub fn stats(mut self, stats: Arc<ModifierTable>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Override the coin-flip RNG.
    ///
    /// Defaults to [`PcgRng`] when the config carries a seed and to
    /// [`StdRngOracle`] seeded from entropy otherwise.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Publish into an existing bus instead of a fresh one.
    pub fn event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Equip the loadout's abilities and queue its modifiers.
    pub fn loadout(mut self, loadout: &Loadout, catalog: &AbilityCatalog) -> Result<Self> {
        self.slots = loadout.resolve(catalog)?;
        self.modifiers.extend(loadout.modifiers.iter().cloned());
        Ok(self)
    }

    pub fn build(self) -> Result<Session> {
        let Self {
            config,
            stats,
            modifiers,
            rng,
            slots,
            bus,
        } = self;

        let stats = match stats {
            Some(table) => {
                for entry in modifiers {
                    table.add(entry.stat, entry.bonus);
                }
                Some(table)
            }
            None if !modifiers.is_empty() => Some(Arc::new(ModifierTable::with_entries(
                config.combat.player,
                modifiers,
            ))),
            None => None,
        };
        let stats_revision = stats.as_ref().map_or(0, |table| table.revision());
        let pipeline = stats
            .clone()
            .map(|table| table as Arc<dyn StatModifierPipeline>);

        let rng = rng.unwrap_or_else(|| default_rng(config.rng_seed));
        let director = Arc::new(CombatDirector::new());
        let targeting = Arc::new(Mutex::new(IntentTargeting::new()));
        let narration = Arc::new(MessageQueue::with_capacity(config.narration_capacity));
        let bus = bus.unwrap_or_else(|| EventBus::with_capacity(config.event_buffer_size));

        let player = Player::new(config.combat.clone(), pipeline.clone(), rng);
        let mut manager = PlayerAbilityManager::new(
            config.combat.clone(),
            Arc::clone(&director) as Arc<dyn CombatManager>,
            pipeline,
            Box::new(Arc::clone(&targeting)) as Box<dyn AbilityTargeting>,
            Arc::clone(&narration) as Arc<dyn NarrationSink>,
        );
        for (slot, ability) in slots.into_iter().enumerate() {
            if let Some(ability) = ability {
                manager.equip(slot, ability)?;
            }
        }

        Ok(Session {
            config,
            roster: Roster::new(player),
            manager,
            director,
            targeting,
            narration,
            stats,
            stats_revision,
            bus,
            encounter: None,
        })
    }
}
