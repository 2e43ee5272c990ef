use crate::state::UnitId;

/// What an effect does when it runs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Damage { amount: f32 },
    Heal { amount: f32 },
    Block { amount: f32 },
    /// Multiplies the accumulated multiplier seen by later effects.
    Amplify { factor: f32 },
}

/// One step of an ability's effect chain.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityEffect {
    pub kind: EffectKind,

    /// Apply to the caster instead of the current target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_self: bool,
}

impl AbilityEffect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            target_self: false,
        }
    }

    pub fn damage(amount: f32) -> Self {
        Self::new(EffectKind::Damage { amount })
    }

    pub fn heal(amount: f32) -> Self {
        Self::new(EffectKind::Heal { amount })
    }

    pub fn block(amount: f32) -> Self {
        Self::new(EffectKind::Block { amount })
    }

    pub fn amplify(factor: f32) -> Self {
        Self::new(EffectKind::Amplify { factor })
    }

    pub fn on_self(mut self) -> Self {
        self.target_self = true;
        self
    }
}

/// Record of an effect that changed something.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    /// Affected unit. The caster for multiplier changes.
    pub target: UnitId,
    pub kind: EffectKind,
    /// Magnitude after modifiers and the accumulated multiplier, before rounding.
    pub magnitude: f32,
    /// What actually landed: damage dealt, health restored, block gained or
    /// the new multiplier.
    pub applied: f32,
}
