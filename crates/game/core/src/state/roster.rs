use super::{Player, Unit, UnitCapabilities, UnitId};
use crate::event::EventQueue;

/// Every live combatant, addressable by [`UnitId`].
///
/// The player always answers to [`UnitId::PLAYER`]. The roster also carries
/// the frame's event queue so effect code can borrow a unit and the queue at
/// the same time.
#[derive(Debug)]
pub struct Roster {
    pub player: Player,
    pub events: EventQueue,
    units: Vec<Unit>,
    next_id: u32,
}

impl Roster {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            events: EventQueue::new(),
            units: Vec::new(),
            // 0 is reserved for the player
            next_id: 1,
        }
    }

    /// Adds a non-player unit and returns its freshly allocated id.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        max_health: f32,
        capabilities: UnitCapabilities,
    ) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.push(Unit::new(id, name, max_health, capabilities));
        id
    }

    pub fn spawn_enemy(&mut self, name: impl Into<String>, max_health: f32) -> UnitId {
        self.spawn(name, max_health, UnitCapabilities::enemy())
    }

    /// Spawns a destructible non-hostile unit.
    pub fn spawn_prop(&mut self, name: impl Into<String>, max_health: f32) -> UnitId {
        self.spawn(name, max_health, UnitCapabilities::prop())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        if id.is_player() {
            return Some(self.player.unit());
        }
        self.units.iter().find(|unit| unit.id() == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        if id.is_player() {
            return Some(self.player.unit_mut());
        }
        self.units.iter_mut().find(|unit| unit.id() == id)
    }

    /// Borrows a unit together with the event queue.
    pub fn unit_with_events(&mut self, id: UnitId) -> Option<(&mut Unit, &mut EventQueue)> {
        let unit = if id.is_player() {
            self.player.unit_mut()
        } else {
            self.units.iter_mut().find(|unit| unit.id() == id)?
        };
        Some((unit, &mut self.events))
    }

    /// Player and other units that can still be affected.
    pub fn is_targetable(&self, id: UnitId) -> bool {
        self.unit(id).is_some_and(|unit| !unit.is_dead() && !unit.is_despawned())
    }

    /// Non-player units in spawn order.
    pub fn others(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    pub fn hostiles_remaining(&self) -> usize {
        self.units
            .iter()
            .filter(|unit| unit.is_hostile() && !unit.is_dead() && !unit.is_despawned())
            .count()
    }

    /// Removes despawned units and returns their ids.
    pub fn sweep_despawned(&mut self) -> Vec<UnitId> {
        let mut swept = Vec::new();
        self.units.retain(|unit| {
            if unit.is_despawned() {
                swept.push(unit.id());
                false
            } else {
                true
            }
        });
        swept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::env::FixedRoll;

    fn create_test_roster() -> Roster {
        Roster::new(Player::new(
            CombatConfig::default(),
            None,
            Box::new(FixedRoll::ALWAYS_HIT),
        ))
    }

    #[test]
    fn spawned_ids_skip_the_player() {
        let mut roster = create_test_roster();

        let a = roster.spawn_enemy("Goblin", 10.0);
        let b = roster.spawn_prop("Barrel", 5.0);

        assert_eq!(a, UnitId(1));
        assert_eq!(b, UnitId(2));
        assert_eq!(roster.unit(UnitId::PLAYER).map(Unit::name), Some("Player"));
        assert_eq!(roster.hostiles_remaining(), 1);

        let barrel = roster.unit(b).unwrap();
        assert!(!barrel.is_hostile());
        assert!(barrel.capabilities().contains(UnitCapabilities::DESPAWN_ON_DEATH));
        assert!(roster.is_targetable(b));
    }

    #[test]
    fn despawned_units_are_swept() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 10.0);

        let (unit, events) = roster.unit_with_events(goblin).unwrap();
        unit.take_damage(10.0, events);

        assert!(!roster.is_targetable(goblin));
        assert_eq!(roster.hostiles_remaining(), 0);
        assert_eq!(roster.sweep_despawned(), vec![goblin]);
        assert!(roster.unit(goblin).is_none());
    }
}
