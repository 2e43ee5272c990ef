//! Frame-driven orchestration around the combat rules.
//!
//! The core crate knows nothing about time sources, turn order or where
//! notifications go. This crate supplies those pieces and wires them into a
//! [`Session`] that a host drives once per frame.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`director`] arbitrates encounter turns
//! - [`events`] provides a topic-based event bus for presentation layers
//! - [`rng`] adapts `rand` to the core RNG oracle
pub mod config;
pub mod director;
pub mod error;
pub mod events;
pub mod rng;
pub mod session;

pub use config::RuntimeConfig;
pub use director::CombatDirector;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic, TurnEvent};
pub use rng::StdRngOracle;
pub use session::{Session, SessionBuilder};
