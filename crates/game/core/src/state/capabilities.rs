use bitflags::bitflags;

bitflags! {
    /// Per-instance behaviour switches for a [`super::Unit`].
    ///
    /// Player, enemy and prop differ only in which of these are set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitCapabilities: u8 {
        /// Block only accrues while the unit is engaged in combat.
        const COMBAT_RESTRICTED_BLOCK = 1 << 0;
        /// The unit is despawned as soon as it dies.
        const DESPAWN_ON_DEATH        = 1 << 1;
        /// Counts toward the encounter's remaining opposition.
        const HOSTILE                 = 1 << 2;
    }
}

impl UnitCapabilities {
    pub const fn player() -> Self {
        Self::COMBAT_RESTRICTED_BLOCK
    }

    pub const fn enemy() -> Self {
        Self::DESPAWN_ON_DEATH.union(Self::HOSTILE)
    }

    pub const fn prop() -> Self {
        Self::DESPAWN_ON_DEATH
    }
}
