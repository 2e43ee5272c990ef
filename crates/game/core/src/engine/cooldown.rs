use crate::config::CombatConfig;

/// Independent per-slot cooldown timers, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownTimers {
    remaining: [f32; CombatConfig::ABILITY_SLOTS],
}

impl CooldownTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the timer for `slot`. Out-of-range slots are ignored.
    pub fn start(&mut self, slot: usize, duration: f32) {
        if let Some(timer) = self.remaining.get_mut(slot) {
            *timer = duration.max(0.0);
        }
    }

    /// Advances every timer by `dt`, flooring at zero.
    pub fn tick(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }
        for timer in &mut self.remaining {
            *timer = (*timer - dt).max(0.0);
        }
    }

    pub fn remaining(&self, slot: usize) -> f32 {
        self.remaining.get(slot).copied().unwrap_or(0.0)
    }

    pub fn is_ready(&self, slot: usize) -> bool {
        self.remaining(slot) <= 0.0
    }

    pub fn reset(&mut self) {
        self.remaining = Default::default();
    }
}
