//! Bonus application system following the layered stack architecture.
//!
//! Every stat adjusted by [`super::ModifierTable`] runs through the same
//! calculation order:
//! Flat → %Inc → More → Less → Clamp

/// A single bonus that can be applied to a stat value.
///
/// - **Flat**: Additive bonuses applied first (e.g., +2 damage from a ring)
/// - **Increased**: Percentage increases, summed then multiplied (e.g., +20%)
/// - **More**: Sequential multipliers applied individually (e.g., ×1.5)
/// - **Less**: Sequential reductions applied individually (e.g., ×0.9)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Flat additive bonus (applied first)
    Flat(f32),

    /// Percentage increase (summed with other %Inc, then multiplied)
    /// Stored as percentage (e.g., 20 = +20%)
    Increased(f32),

    /// Multiplicative "more" modifier (applied sequentially)
    /// Stored as percentage (e.g., 50 = ×1.5, -20 = ×0.8)
    More(f32),

    /// Multiplicative "less" modifier (applied sequentially)
    /// Stored as percentage (e.g., 10 = ×0.9)
    Less(f32),
}

impl Bonus {
    pub fn flat(value: f32) -> Self {
        Bonus::Flat(value)
    }

    pub fn increased(percent: f32) -> Self {
        Bonus::Increased(percent)
    }

    pub fn more(percent: f32) -> Self {
        Bonus::More(percent)
    }

    pub fn less(percent: f32) -> Self {
        Bonus::Less(percent)
    }
}

/// A collection of bonuses that will be applied in the correct order.
///
/// # Example
/// ```
/// # use tactics_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::flat(5.0));          // +5
/// stack.add(Bonus::increased(20.0));    // +20%
/// stack.add(Bonus::more(50.0));         // ×1.5
///
/// // (10 + 5) × 1.2 × 1.5 = 27
/// assert_eq!(stack.apply(10.0, 0.0, 100.0), 27.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self {
            bonuses: Vec::new(),
        }
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    pub fn clear(&mut self) {
        self.bonuses.clear();
    }

    /// Apply all bonuses to a base value with clamping
    ///
    /// # Formula
    /// ```text
    /// result = clamp((base + flat_sum) × (1 + inc_sum/100) × Π(1 + more/100) × Π(1 - less/100), min, max)
    /// ```
    pub fn apply(&self, base: f32, min: f32, max: f32) -> f32 {
        let flat_sum: f32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Flat(v) => Some(*v),
                _ => None,
            })
            .sum();

        let inc_sum: f32 = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Increased(p) => Some(*p),
                _ => None,
            })
            .sum();

        let after_inc = (base + flat_sum) * (100.0 + inc_sum) / 100.0;

        let after_more = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::More(p) => Some(*p),
                _ => None,
            })
            .fold(after_inc, |acc, more| acc * (100.0 + more) / 100.0);

        let after_less = self
            .bonuses
            .iter()
            .filter_map(|b| match b {
                Bonus::Less(p) => Some(*p),
                _ => None,
            })
            .fold(after_more, |acc, less| acc * (100.0 - less) / 100.0);

        after_less.clamp(min, max)
    }

    /// Apply bonuses without clamping.
    pub fn apply_unclamped(&self, base: f32) -> f32 {
        self.apply(base, f32::MIN, f32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Builder helpers for constructing bonus stacks fluently.
impl BonusStack {
    pub fn flat(mut self, value: f32) -> Self {
        self.add(Bonus::flat(value));
        self
    }

    pub fn increased(mut self, percent: f32) -> Self {
        self.add(Bonus::increased(percent));
        self
    }

    pub fn more(mut self, percent: f32) -> Self {
        self.add(Bonus::more(percent));
        self
    }

    pub fn less(mut self, percent: f32) -> Self {
        self.add(Bonus::less(percent));
        self
    }
}

/// Clamp bounds per stat family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatBounds {
    pub min: f32,
    pub max: f32,
}

impl StatBounds {
    /// Effect magnitudes never go negative.
    pub const MAGNITUDE: Self = Self {
        min: 0.0,
        max: 1_000_000.0,
    };

    /// Max health never drops below one.
    pub const HEALTH: Self = Self {
        min: 1.0,
        max: 1_000_000.0,
    };

    /// Coin counts and movement budgets.
    pub const BUDGET: Self = Self {
        min: 0.0,
        max: 10_000.0,
    };
}
