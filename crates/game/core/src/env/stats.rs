//! External stat aggregation contract.

/// Pure lookups that adjust ability magnitudes and derived player stats.
///
/// Implementations aggregate equipment, buffs and other modifiers. The core
/// treats every method as a pure function of the current modifier set; when a
/// pipeline is absent, callers fall back to their locally stored defaults.
pub trait StatModifierPipeline: Send + Sync {
    /// Adjusts a damage effect's base magnitude.
    fn apply_damage(&self, base: f32) -> f32;

    /// Adjusts a heal effect's base magnitude.
    fn apply_heal(&self, base: f32) -> f32;

    /// Adjusts a block effect's base magnitude.
    fn apply_block(&self, base: f32) -> f32;

    /// Derived maximum health of the player.
    fn max_health(&self) -> f32;

    /// Coins granted at the start of each combat turn.
    fn base_coins(&self) -> u32;

    /// Maximum unspent coins carried into the next turn.
    fn carryover_coins(&self) -> u32;

    /// Per-turn movement budget while in combat.
    fn max_combat_move_distance(&self) -> f32;

    /// Generation counter bumped whenever the modifier set changes.
    ///
    /// Hosts poll this to deliver the modifiers-changed notification to the
    /// player (see [`crate::Player::on_modifiers_changed`]).
    fn revision(&self) -> u64 {
        0
    }
}
