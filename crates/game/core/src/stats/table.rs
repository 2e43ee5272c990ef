use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use super::bonus::{Bonus, BonusStack, StatBounds};
use crate::config::PlayerDefaults;
use crate::env::StatModifierPipeline;

/// Stats that accept bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKey {
    Damage,
    Heal,
    Block,
    MaxHealth,
    BaseCoins,
    CarryoverCoins,
    MoveDistance,
}

impl StatKey {
    pub const COUNT: usize = 7;

    const fn index(self) -> usize {
        self as usize
    }

    fn bounds(self) -> StatBounds {
        match self {
            Self::Damage | Self::Heal | Self::Block => StatBounds::MAGNITUDE,
            Self::MaxHealth => StatBounds::HEALTH,
            Self::BaseCoins | Self::CarryoverCoins | Self::MoveDistance => StatBounds::BUDGET,
        }
    }
}

/// A single authored modifier, as found in loadout files.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierEntry {
    pub stat: StatKey,
    pub bonus: Bonus,
}

/// Base player stats plus one bonus stack per [`StatKey`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSheet {
    pub base: PlayerDefaults,
    stacks: [BonusStack; StatKey::COUNT],
}

impl ModifierSheet {
    pub fn new(base: PlayerDefaults) -> Self {
        Self {
            base,
            stacks: Default::default(),
        }
    }

    pub fn stack(&self, key: StatKey) -> &BonusStack {
        &self.stacks[key.index()]
    }

    pub fn stack_mut(&mut self, key: StatKey) -> &mut BonusStack {
        &mut self.stacks[key.index()]
    }

    /// Applies the stack for `key` to `base`, clamped to the stat's bounds.
    pub fn resolve(&self, key: StatKey, base: f32) -> f32 {
        let bounds = key.bounds();
        self.stack(key).apply(base, bounds.min, bounds.max)
    }
}

/// Thread-safe modifier set implementing [`StatModifierPipeline`].
///
/// Every mutation bumps [`StatModifierPipeline::revision`] so hosts can
/// deliver the modifiers-changed notification on their next tick.
#[derive(Debug, Default)]
pub struct ModifierTable {
    sheet: RwLock<ModifierSheet>,
    revision: AtomicU64,
}

impl ModifierTable {
    pub fn new(base: PlayerDefaults) -> Self {
        Self {
            sheet: RwLock::new(ModifierSheet::new(base)),
            revision: AtomicU64::new(0),
        }
    }

    pub fn with_entries(
        base: PlayerDefaults,
        entries: impl IntoIterator<Item = ModifierEntry>,
    ) -> Self {
        let mut sheet = ModifierSheet::new(base);
        for entry in entries {
            sheet.stack_mut(entry.stat).add(entry.bonus);
        }
        Self {
            sheet: RwLock::new(sheet),
            revision: AtomicU64::new(0),
        }
    }

    pub fn add(&self, key: StatKey, bonus: Bonus) {
        self.write(|sheet| sheet.stack_mut(key).add(bonus));
    }

    pub fn clear(&self, key: StatKey) {
        self.write(|sheet| sheet.stack_mut(key).clear());
    }

    pub fn set_base(&self, base: PlayerDefaults) {
        self.write(|sheet| sheet.base = base);
    }

    pub fn snapshot(&self) -> ModifierSheet {
        self.sheet
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, mutate: impl FnOnce(&mut ModifierSheet)) {
        let mut sheet = self.sheet.write().unwrap_or_else(PoisonError::into_inner);
        mutate(&mut sheet);
        self.revision.fetch_add(1, Ordering::Release);
    }

    fn resolve(&self, key: StatKey, base: impl FnOnce(&PlayerDefaults) -> f32) -> f32 {
        let sheet = self.sheet.read().unwrap_or_else(PoisonError::into_inner);
        let base = base(&sheet.base);
        sheet.resolve(key, base)
    }
}

impl StatModifierPipeline for ModifierTable {
    fn apply_damage(&self, base: f32) -> f32 {
        self.resolve(StatKey::Damage, |_| base)
    }

    fn apply_heal(&self, base: f32) -> f32 {
        self.resolve(StatKey::Heal, |_| base)
    }

    fn apply_block(&self, base: f32) -> f32 {
        self.resolve(StatKey::Block, |_| base)
    }

    fn max_health(&self) -> f32 {
        self.resolve(StatKey::MaxHealth, |b| b.max_health)
    }

    fn base_coins(&self) -> u32 {
        self.resolve(StatKey::BaseCoins, |b| b.base_coins as f32).floor() as u32
    }

    fn carryover_coins(&self) -> u32 {
        self.resolve(StatKey::CarryoverCoins, |b| b.carryover_cap as f32)
            .floor() as u32
    }

    fn max_combat_move_distance(&self) -> f32 {
        self.resolve(StatKey::MoveDistance, |b| b.max_combat_move_distance)
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_passes_base_values_through() {
        let table = ModifierTable::new(PlayerDefaults::default());

        assert_eq!(table.apply_damage(10.0), 10.0);
        assert_eq!(table.max_health(), PlayerDefaults::DEFAULT_MAX_HEALTH);
        assert_eq!(table.base_coins(), PlayerDefaults::DEFAULT_BASE_COINS);
        assert_eq!(table.carryover_coins(), PlayerDefaults::DEFAULT_CARRYOVER_CAP);
        assert_eq!(table.revision(), 0);
    }

    #[test]
    fn bonuses_only_touch_their_own_stat() {
        let table = ModifierTable::new(PlayerDefaults::default());
        table.add(StatKey::Damage, Bonus::increased(50.0));

        assert_eq!(table.apply_damage(10.0), 15.0);
        assert_eq!(table.apply_heal(10.0), 10.0);
    }

    #[test]
    fn mutations_bump_revision() {
        let table = ModifierTable::new(PlayerDefaults::default());
        table.add(StatKey::MaxHealth, Bonus::flat(20.0));
        table.clear(StatKey::MaxHealth);

        assert_eq!(table.revision(), 2);
        assert_eq!(table.max_health(), 100.0);
    }

    #[test]
    fn coins_round_down_and_health_stays_positive() {
        let table = ModifierTable::with_entries(
            PlayerDefaults::default(),
            [
                ModifierEntry {
                    stat: StatKey::BaseCoins,
                    bonus: Bonus::increased(50.0),
                },
                ModifierEntry {
                    stat: StatKey::MaxHealth,
                    bonus: Bonus::less(100.0),
                },
            ],
        );

        // 3 × 1.5 = 4.5
        assert_eq!(table.base_coins(), 4);
        assert_eq!(table.max_health(), 1.0);
    }

    #[test]
    fn stat_keys_parse_case_insensitively() {
        assert_eq!("move_distance".parse::<StatKey>().unwrap(), StatKey::MoveDistance);
        assert_eq!("DAMAGE".parse::<StatKey>().unwrap(), StatKey::Damage);
    }
}
