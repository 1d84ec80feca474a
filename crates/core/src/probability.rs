//! Probability engine
//!
//! Every spread decision is an independent Bernoulli trial drawn from a
//! [`ProbabilitySource`]. Production runs use [`RandomSource`]; tests inject
//! [`ScriptedSource`] or [`AlwaysSucceed`] to make runs reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws
pub trait ProbabilitySource {
    /// Integer in `[0, n)`, each value with probability `1/n`. `n` must be > 0.
    fn draw_uniform_int(&mut self, n: u32) -> u32;

    /// Real in `[0, 1)`
    fn draw_uniform_unit(&mut self) -> f64;

    /// Discrete trial that succeeds with probability `1/n`
    #[inline]
    fn one_in(&mut self, n: u32) -> bool {
        self.draw_uniform_int(n) == 0
    }

    /// Continuous trial that succeeds with probability `p`
    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.draw_uniform_unit() < p
    }
}

impl<P: ProbabilitySource + ?Sized> ProbabilitySource for &mut P {
    fn draw_uniform_int(&mut self, n: u32) -> u32 {
        (**self).draw_uniform_int(n)
    }

    fn draw_uniform_unit(&mut self) -> f64 {
        (**self).draw_uniform_unit()
    }
}

/// Seeded pseudo-random source
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Source with a fixed seed: the same seed and draw order reproduce a run
    pub fn seeded(seed: u64) -> Self {
        RandomSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system
    pub fn from_entropy() -> Self {
        RandomSource {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl ProbabilitySource for RandomSource {
    fn draw_uniform_int(&mut self, n: u32) -> u32 {
        self.rng.random_range(0..n)
    }

    fn draw_uniform_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed cyclic sequence of unit values.
///
/// Integer draws map the next value `u` to `floor(u * n)`, so a sequence of
/// zeros makes every trial succeed and values close to 1 make them fail.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values outside `[0, 1)` are clamped into it. An empty sequence behaves
    /// like a single `0.0`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        if values.is_empty() {
            values.push(0.0);
        }
        ScriptedSource { values, cursor: 0 }
    }

    /// Number of draws served so far
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl ProbabilitySource for ScriptedSource {
    fn draw_uniform_int(&mut self, n: u32) -> u32 {
        let scaled = (self.next_value() * f64::from(n)).floor() as u32;
        scaled.min(n.saturating_sub(1))
    }

    fn draw_uniform_unit(&mut self) -> f64 {
        self.next_value()
    }
}

/// Every trial succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysSucceed;

impl ProbabilitySource for AlwaysSucceed {
    fn draw_uniform_int(&mut self, _n: u32) -> u32 {
        0
    }

    fn draw_uniform_unit(&mut self) -> f64 {
        0.0
    }
}
