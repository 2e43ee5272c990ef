//! Ability definitions and the effect pipeline.
//!
//! An [`Ability`] is immutable, externally authored data: an ordered chain of
//! [`AbilityEffect`]s plus presentation hints. [`execute_ability`] runs that
//! chain against a [`TargetingResult`] produced by an [`AbilityTargeting`]
//! implementation.
mod context;
mod effect;
mod execute;
mod targeting;

pub use context::AbilityExecutionContext;
pub use effect::{AbilityEffect, AppliedEffect, EffectKind};
pub use execute::{ExecutionReport, execute_ability};
pub use targeting::{
    AbilityTargeting, IntentTargeting, TargetingError, TargetingIntent, TargetingNotification,
    TargetingResult,
};

/// How the ability picks its targets and where its visuals are placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingType {
    /// One unit, confirmed by clicking it.
    #[default]
    PointAndClick,
    /// A fan of units in front of the caster.
    Cone,
    /// An area placed at range.
    #[strum(serialize = "ranged_aoe")]
    RangedAOE,
}

impl TargetingType {
    /// Whether targeting accumulates a selection before confirming.
    pub fn is_area(self) -> bool {
        matches!(self, Self::Cone | Self::RangedAOE)
    }
}

/// Immutable ability definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,

    /// Effects in execution order.
    pub effects: Vec<AbilityEffect>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub targeting_type: TargetingType,

    /// Seconds between resolution and the effect chain running.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect_delay: f32,

    /// Opaque sound reference for the presentation layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast_sound: Option<String>,

    /// Opaque visual prefab reference for the presentation layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visual: Option<String>,
}

impl Ability {
    pub fn new(name: impl Into<String>, targeting_type: TargetingType) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
            targeting_type,
            effect_delay: 0.0,
            cast_sound: None,
            visual: None,
        }
    }

    pub fn with_effect(mut self, effect: AbilityEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.effect_delay = seconds;
        self
    }

    /// Delay in seconds, with negative or NaN authoring treated as none.
    pub fn delay(&self) -> f32 {
        if self.effect_delay > 0.0 {
            self.effect_delay
        } else {
            0.0
        }
    }

    pub fn is_delayed(&self) -> bool {
        self.delay() > 0.0
    }
}
