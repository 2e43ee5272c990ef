use tactics_core::CombatConfig;

/// Settings for a [`crate::Session`].
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Per-topic buffer of the event bus.
    pub event_buffer_size: usize,
    /// Narration lines kept between ticks before the oldest are dropped.
    pub narration_capacity: usize,
    /// Seed for the replayable coin-flip RNG. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            event_buffer_size: 100,
            narration_capacity: 64,
            rng_seed: None,
        }
    }
}
