use super::effect::AppliedEffect;
use crate::state::UnitId;

/// Shared state threaded through one ability execution.
///
/// Every effect in the chain sees the same instance, so a multiplier raised by
/// an earlier effect scales the ones after it.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityExecutionContext {
    pub caster: UnitId,
    pub current_target: Option<UnitId>,
    pub accumulated_multiplier: f32,
    /// Set once damage lands on anyone other than the caster.
    pub enemy_was_hit: bool,
    pub ability_name: String,
    pub applied: Vec<AppliedEffect>,
}

impl AbilityExecutionContext {
    pub const BASE_MULTIPLIER: f32 = 1.0;

    pub fn new(caster: UnitId, ability_name: impl Into<String>) -> Self {
        Self {
            caster,
            current_target: None,
            accumulated_multiplier: Self::BASE_MULTIPLIER,
            enemy_was_hit: false,
            ability_name: ability_name.into(),
            applied: Vec::new(),
        }
    }

    /// Points the chain at the next target and rewinds the multiplier.
    pub fn begin_target(&mut self, target: Option<UnitId>) {
        self.current_target = target;
        self.accumulated_multiplier = Self::BASE_MULTIPLIER;
    }

    pub fn scale(&self, base: f32) -> f32 {
        base * self.accumulated_multiplier
    }

    /// Resolves who an effect lands on.
    pub fn resolve_target(&self, target_self: bool) -> Option<UnitId> {
        if target_self {
            Some(self.caster)
        } else {
            self.current_target
        }
    }
}
