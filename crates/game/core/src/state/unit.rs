use super::{UnitCapabilities, UnitId};
use crate::event::{CombatEvent, EventQueue};

/// Outcome of a single [`Unit::take_damage`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Rounded incoming damage. Zero when the hit was ignored.
    pub dealt: f32,
    /// Portion absorbed by block.
    pub blocked: f32,
    /// Health actually removed.
    pub health_lost: f32,
    /// This hit moved the unit into the died state.
    pub died: bool,
}

/// Health and block for any combat participant.
///
/// All mutation goes through the methods below, which append the resulting
/// notifications to the caller's [`EventQueue`]. Amounts are rounded up to
/// whole numbers before they are applied.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    id: UnitId,
    name: String,
    max_health: f32,
    current_health: f32,
    current_block: f32,
    capabilities: UnitCapabilities,
    engaged: bool,
    died: bool,
    despawned: bool,
}

impl Unit {
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        max_health: f32,
        capabilities: UnitCapabilities,
    ) -> Self {
        let max_health = max_health.max(1.0);
        Self {
            id,
            name: name.into(),
            max_health,
            current_health: max_health,
            current_block: 0.0,
            capabilities,
            engaged: false,
            died: false,
            despawned: false,
        }
    }

    pub fn enemy(id: UnitId, name: impl Into<String>, max_health: f32) -> Self {
        Self::new(id, name, max_health, UnitCapabilities::enemy())
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn current_block(&self) -> f32 {
        self.current_block
    }

    pub fn capabilities(&self) -> UnitCapabilities {
        self.capabilities
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0.0
    }

    pub fn is_despawned(&self) -> bool {
        self.despawned
    }

    pub fn is_hostile(&self) -> bool {
        self.capabilities.contains(UnitCapabilities::HOSTILE)
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Marks the unit as being in (or out of) a combat state.
    pub fn set_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
    }

    /// Applies incoming damage, block first.
    ///
    /// Non-positive amounts and hits on an already dead unit are ignored.
    pub fn take_damage(&mut self, amount: f32, events: &mut EventQueue) -> DamageReport {
        let rounded = amount.ceil();
        if !(rounded > 0.0) || self.died {
            return DamageReport::default();
        }

        let blocked = self.current_block.min(rounded);
        if blocked > 0.0 {
            self.current_block -= blocked;
            events.push(CombatEvent::BlockChanged {
                unit: self.id,
                block: self.current_block,
            });
        }

        let before = self.current_health;
        self.current_health = (self.current_health - (rounded - blocked)).max(0.0);
        let health_lost = before - self.current_health;
        if health_lost > 0.0 {
            self.emit_health(events);
        }

        let died = self.current_health <= 0.0 && !self.died;
        if died {
            self.died = true;
            events.push(CombatEvent::Died { unit: self.id });
            if self.capabilities.contains(UnitCapabilities::DESPAWN_ON_DEATH) {
                self.despawned = true;
                events.push(CombatEvent::Despawned { unit: self.id });
            }
        }

        DamageReport {
            dealt: rounded,
            blocked,
            health_lost,
            died,
        }
    }

    /// Restores health up to the maximum and returns the amount healed.
    ///
    /// Dead units cannot be healed.
    pub fn heal(&mut self, amount: f32, events: &mut EventQueue) -> f32 {
        let rounded = amount.ceil();
        if !(rounded > 0.0) || self.died {
            return 0.0;
        }

        let before = self.current_health;
        self.current_health = (self.current_health + rounded).min(self.max_health);
        let healed = self.current_health - before;
        if healed > 0.0 {
            self.emit_health(events);
        }
        healed
    }

    /// Adds block and returns the amount gained.
    pub fn add_block(&mut self, amount: f32, events: &mut EventQueue) -> f32 {
        if self
            .capabilities
            .contains(UnitCapabilities::COMBAT_RESTRICTED_BLOCK)
            && !self.engaged
        {
            return 0.0;
        }

        let rounded = amount.ceil();
        if !(rounded > 0.0) {
            return 0.0;
        }

        self.current_block += rounded;
        events.push(CombatEvent::BlockChanged {
            unit: self.id,
            block: self.current_block,
        });
        rounded
    }

    pub fn clear_block(&mut self, events: &mut EventQueue) {
        if self.current_block == 0.0 {
            return;
        }
        self.current_block = 0.0;
        events.push(CombatEvent::BlockChanged {
            unit: self.id,
            block: 0.0,
        });
    }

    /// Sets a new maximum health, floored at 1.
    ///
    /// Current health is always clamped down to the new maximum and never
    /// raised. `adjust_current` controls whether the change is announced
    /// with a health notification.
    pub fn set_max_health(&mut self, new_max: f32, adjust_current: bool, events: &mut EventQueue) {
        let new_max = new_max.max(1.0);
        let changed = new_max != self.max_health || self.current_health > new_max;
        self.max_health = new_max;
        self.current_health = self.current_health.min(new_max);

        if adjust_current && changed {
            self.emit_health(events);
        }
    }

    fn emit_health(&self, events: &mut EventQueue) {
        events.push(CombatEvent::HealthChanged {
            unit: self.id,
            current: self.current_health,
            max: self.max_health,
        });
    }
}
