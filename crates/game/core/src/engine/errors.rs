//! Rejections raised by the ability manager.
//!
//! Each of these leaves the manager, the player and every cooldown exactly as
//! they were before the call.

use crate::error::{ErrorSeverity, GameError};

/// Why an ability could not start targeting.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartAbilityError {
    /// Another slot is already targeting.
    #[error("Slot {active} is already targeting")]
    AlreadyTargeting { active: usize },

    #[error("Slot {slot} does not exist")]
    InvalidSlot { slot: usize },

    #[error("Slot {slot} has no ability equipped")]
    EmptySlot { slot: usize },

    #[error("Slot {slot} is on cooldown for {remaining:.2}s")]
    OnCooldown { slot: usize, remaining: f32 },

    /// Targeting is locked between the end of the player's turn and the next
    /// turn start.
    #[error("Targeting is locked until the next turn starts")]
    TargetingLocked,

    #[error("Not the player's turn")]
    NotPlayerTurn,

    #[error("No coins left to cast")]
    InsufficientCoins,
}

impl GameError for StartAbilityError {
    fn severity(&self) -> ErrorSeverity {
        use StartAbilityError::*;
        match self {
            InvalidSlot { .. } | EmptySlot { .. } => ErrorSeverity::Validation,
            AlreadyTargeting { .. }
            | OnCooldown { .. }
            | TargetingLocked
            | NotPlayerTurn
            | InsufficientCoins => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use StartAbilityError::*;
        match self {
            AlreadyTargeting { .. } => "ABILITY_ALREADY_TARGETING",
            InvalidSlot { .. } => "ABILITY_INVALID_SLOT",
            EmptySlot { .. } => "ABILITY_EMPTY_SLOT",
            OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
            TargetingLocked => "ABILITY_TARGETING_LOCKED",
            NotPlayerTurn => "ABILITY_NOT_PLAYER_TURN",
            InsufficientCoins => "ABILITY_INSUFFICIENT_COINS",
        }
    }
}

/// Why a slot could not be (un)equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotError {
    #[error("Slot {slot} does not exist")]
    OutOfRange { slot: usize },

    #[error("Slot {slot} is targeting and cannot be changed")]
    Busy { slot: usize },
}

impl GameError for SlotError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfRange { .. } => ErrorSeverity::Validation,
            Self::Busy { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "SLOT_OUT_OF_RANGE",
            Self::Busy { .. } => "SLOT_BUSY",
        }
    }
}
