//! Randomness capability passed into every stochastic decision.
//!
//! Breeding draws, litter sizes, sex assignment, infection rolls, weather
//! timers and population seeding all go through [`RandomSource`], so a
//! simulation can be driven by a seeded generator in production and by a
//! scripted sequence in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random draws.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool {
        self.next_f64() < 0.5
    }

    /// Uniform integer in `[0, bound)`. `bound` must be positive.
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        ((self.next_f64() * bound as f64) as u32).min(bound - 1)
    }

    /// One fresh draw compared against `probability` (inclusive).
    #[inline]
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() <= probability
    }
}

/// Production source backed by ChaCha8 (seeded for reproducibility).
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed drawn from the thread-local generator.
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_bool(&mut self) -> bool {
        self.rng.gen()
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Integer and boolean draws are derived from the same `f64` stream, so a
/// script of `[0.0]` makes every chance succeed, every coin come up `true`
/// and every bounded draw return zero.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Cycle through `draws`. Values are clamped into `[0, 1)`.
    pub fn from_sequence(draws: Vec<f64>) -> Self {
        let draws = if draws.is_empty() { vec![0.0] } else { draws };
        Self {
            draws: draws
                .into_iter()
                .map(|d| d.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
            cursor: 0,
        }
    }

    /// Every draw returns `value`.
    pub fn repeating(value: f64) -> Self {
        Self::from_sequence(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
