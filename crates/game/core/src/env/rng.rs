//! RNG oracle for the adaptive coin flip.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of rolls. Replays and tests depend
//! on it.

use std::collections::VecDeque;

/// Source of percentage rolls.
pub trait RngOracle: Send {
    /// Generate the next raw u32 value.
    fn next_u32(&mut self) -> u32;

    /// Roll a uniform percentage in `[0, 100)` with 0.01 resolution.
    fn roll_percent(&mut self) -> f32 {
        (self.next_u32() % 10_000) as f32 / 100.0
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses PCG-XSH-RR, producing 32-bit output from 64-bit state.
///
/// - **Deterministic**: Same seed always produces same sequence
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::new(0x853c_49e6_748f_ea9b)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Always rolls the same percentage.
///
/// `FixedRoll(0.0)` forces every flip to succeed while the chance is above
/// zero; `FixedRoll(99.99)` forces every flip below 100 to fail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRoll(pub f32);

impl FixedRoll {
    pub const ALWAYS_HIT: Self = Self(0.0);
    pub const ALWAYS_MISS: Self = Self(99.99);
}

impl RngOracle for FixedRoll {
    fn next_u32(&mut self) -> u32 {
        (self.0 * 100.0) as u32
    }

    fn roll_percent(&mut self) -> f32 {
        self.0
    }
}

/// Replays a fixed sequence of percentage rolls, then falls back to a value.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedRng {
    rolls: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRng {
    pub fn new(rolls: impl IntoIterator<Item = f32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.0,
        }
    }

    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.roll_percent() * 100.0) as u32
    }

    fn roll_percent(&mut self) -> f32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
