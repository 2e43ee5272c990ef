//! Unified error type surfaced by the session API.
//!
//! Wraps rejections from the rules crate and content lookups so hosts can
//! bubble them up with consistent context.
use thiserror::Error;

use tactics_content::CatalogError;
use tactics_core::{
    CoinError, ErrorSeverity, GameError, MoveError, SlotError, StartAbilityError, TargetingError,
};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    StartAbility(#[from] StartAbilityError),

    #[error(transparent)]
    Targeting(#[from] TargetingError),

    #[error(transparent)]
    Slot(#[from] SlotError),

    #[error(transparent)]
    Coin(#[from] CoinError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Content(#[from] CatalogError),

    #[error("an encounter is already in progress")]
    EncounterActive,

    #[error("no encounter is in progress")]
    NoEncounter,

    #[error("it is not the player's turn")]
    NotPlayerTurn,
}

impl RuntimeError {
    /// Severity of the underlying rejection, for hosts that filter feedback.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StartAbility(e) => e.severity(),
            Self::Targeting(e) => e.severity(),
            Self::Slot(e) => e.severity(),
            Self::Coin(e) => e.severity(),
            Self::Move(e) => e.severity(),
            Self::Content(e) => e.severity(),
            Self::NotPlayerTurn => ErrorSeverity::Recoverable,
            Self::EncounterActive | Self::NoEncounter => ErrorSeverity::Validation,
        }
    }
}
