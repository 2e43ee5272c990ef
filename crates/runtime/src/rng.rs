use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tactics_core::RngOracle;

/// [`RngOracle`] backed by `rand`'s standard generator.
#[derive(Clone, Debug)]
pub struct StdRngOracle {
    rng: StdRng,
}

impl StdRngOracle {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RngOracle for StdRngOracle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
}
