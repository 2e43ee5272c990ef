use crate::config::FlipConfig;

/// Anti-streak success chance for ability casts.
///
/// Consecutive hits lower the chance and consecutive misses raise it, while a
/// result against the trend snaps straight back to the base rate. The chance
/// oscillates around the base instead of behaving like independent trials.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdaptiveFlip {
    chance: f32,
    config: FlipConfig,
}

impl AdaptiveFlip {
    pub fn new(config: FlipConfig) -> Self {
        Self {
            chance: Self::base_of(&config),
            config,
        }
    }

    pub fn chance(&self) -> f32 {
        self.chance
    }

    pub fn base(&self) -> f32 {
        Self::base_of(&self.config)
    }

    /// Resolves a roll in `[0, 100)` and adjusts the chance for the next one.
    pub fn resolve(&mut self, roll: f32) -> bool {
        let hit = roll < self.chance;
        self.adjust(hit);
        hit
    }

    pub fn reset(&mut self) {
        self.chance = self.base();
    }

    fn adjust(&mut self, hit: bool) {
        let base = self.base();
        self.chance = if hit {
            if self.chance > base {
                base
            } else {
                (self.chance - self.config.success_penalty).max(0.0)
            }
        } else if self.chance < base {
            base
        } else {
            (self.chance + self.config.failure_bonus).min(FlipConfig::MAX_CHANCE)
        };
    }

    fn base_of(config: &FlipConfig) -> f32 {
        config.base_chance.clamp(0.0, FlipConfig::MAX_CHANCE)
    }
}

impl Default for AdaptiveFlip {
    fn default() -> Self {
        Self::new(FlipConfig::default())
    }
}
