use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
///
/// Board generation, dice rolls and boost magnitudes all draw from this.
pub trait RandomSource {
    /// Returns an integer in the closed range `[min, max]`.
    fn int_in(&mut self, min: usize, max: usize) -> usize;

    /// Rolls a single six-sided die.
    fn roll_die(&mut self) -> u8 {
        self.int_in(1, 6) as u8
    }
}

/// The default, seedable random source.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: StdRng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn int_in(&mut self, min: usize, max: usize) -> usize {
        self.inner.gen_range(min..=max)
    }
}
