/// Combat tuning constants and tunable parameters.
///
/// Every field has a default matching the shipped balance, so partial TOML
/// files only need to list what they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Adaptive coin-flip tuning.
    pub flip: FlipConfig,

    /// Local player stats used when no stat pipeline is wired in.
    pub player: PlayerDefaults,

    /// Seconds a slot stays unusable after an ability attempt resolves.
    pub ability_cooldown: f32,

    /// Slack allowed when comparing accumulated movement against the budget.
    pub movement_epsilon: f32,

    /// What happens to delayed effect pipelines when combat ends mid-delay.
    pub delayed_effects: DelayedEffectPolicy,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of equippable ability slots.
    pub const ABILITY_SLOTS: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ABILITY_COOLDOWN: f32 = 2.0;
    pub const DEFAULT_MOVEMENT_EPSILON: f32 = 0.01;

    pub fn new() -> Self {
        Self {
            flip: FlipConfig::default(),
            player: PlayerDefaults::default(),
            ability_cooldown: Self::DEFAULT_ABILITY_COOLDOWN,
            movement_epsilon: Self::DEFAULT_MOVEMENT_EPSILON,
            delayed_effects: DelayedEffectPolicy::default(),
        }
    }

    pub fn with_ability_cooldown(mut self, seconds: f32) -> Self {
        self.ability_cooldown = seconds.max(0.0);
        self
    }

    pub fn with_delayed_effects(mut self, policy: DelayedEffectPolicy) -> Self {
        self.delayed_effects = policy;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Anti-streak coin-flip parameters.
///
/// Chances are percentages in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlipConfig {
    /// Rate the chance is pulled back toward.
    pub base_chance: f32,
    /// Subtracted after a success while at or below base.
    pub success_penalty: f32,
    /// Added after a failure while at or above base.
    pub failure_bonus: f32,
}

impl FlipConfig {
    pub const DEFAULT_BASE_CHANCE: f32 = 60.0;
    pub const DEFAULT_SUCCESS_PENALTY: f32 = 5.0;
    pub const DEFAULT_FAILURE_BONUS: f32 = 10.0;
    pub const MAX_CHANCE: f32 = 100.0;
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            base_chance: Self::DEFAULT_BASE_CHANCE,
            success_penalty: Self::DEFAULT_SUCCESS_PENALTY,
            failure_bonus: Self::DEFAULT_FAILURE_BONUS,
        }
    }
}

/// Player stats stored locally and used as the pipeline fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerDefaults {
    pub max_health: f32,
    pub base_coins: u32,
    pub carryover_cap: u32,
    pub max_combat_move_distance: f32,
}

impl PlayerDefaults {
    pub const DEFAULT_MAX_HEALTH: f32 = 100.0;
    pub const DEFAULT_BASE_COINS: u32 = 3;
    pub const DEFAULT_CARRYOVER_CAP: u32 = 1;
    pub const DEFAULT_MAX_COMBAT_MOVE_DISTANCE: f32 = 10.0;
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            max_health: Self::DEFAULT_MAX_HEALTH,
            base_coins: Self::DEFAULT_BASE_COINS,
            carryover_cap: Self::DEFAULT_CARRYOVER_CAP,
            max_combat_move_distance: Self::DEFAULT_MAX_COMBAT_MOVE_DISTANCE,
        }
    }
}

/// Policy for delayed effect pipelines still pending when combat ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DelayedEffectPolicy {
    /// Committed pipelines run to completion even after combat ends.
    #[default]
    ExecuteAnyway,
    /// Pending pipelines are discarded when combat ends.
    DropOnCombatEnd,
}
