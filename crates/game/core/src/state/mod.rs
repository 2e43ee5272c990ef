//! Combat participants and the roster that addresses them.
//!
//! [`Unit`] owns health and block for every combatant. [`Player`] wraps a
//! unit with the coin economy, the adaptive flip and the movement budget.
//! Effects reach units by [`UnitId`] through the [`Roster`], which also
//! carries the frame's [`crate::EventQueue`].
mod capabilities;
mod common;
mod flip;
mod player;
mod roster;
mod unit;

pub use capabilities::UnitCapabilities;
pub use common::{UnitId, Vec3};
pub use flip::AdaptiveFlip;
pub use player::{CoinError, MoveError, Player};
pub use roster::Roster;
pub use unit::{DamageReport, Unit};
