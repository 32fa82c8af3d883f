//! Deterministic simulation RNG and the pluggable uniform source.
//!
//! # Determinism strategy
//!
//! A run owns exactly one [`SimRng`] seeded from the run's master seed.  The
//! scheduler is single-threaded and dispatches same-instant events in a fixed
//! order, so the sequence of draws (and therefore every sampled interval and
//! fuel amount) is a pure function of the seed and the scenario parameters.
//!
//! Scenario code never talks to `rand` directly; it draws through the
//! [`UniformSource`] trait so tests can substitute a scripted sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── UniformSource ─────────────────────────────────────────────────────────────

/// Source of uniformly distributed integers.
pub trait UniformSource {
    /// Draw an integer uniformly from the inclusive range `[low, high]`.
    ///
    /// Callers guarantee `low <= high`.
    fn uniform_int(&mut self, low: u64, high: u64) -> u64;
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.
///
/// Used only from the single scheduler thread.  If a caller needs an
/// independent stream (e.g. a second replication), derive one with
/// [`child`][Self::child].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl UniformSource for SimRng {
    #[inline]
    fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        self.0.gen_range(low..=high)
    }
}

/// Replays a fixed list of values, cycling when exhausted.  Values outside
/// the requested range are clamped into it.
///
/// Intended for tests that need exact control over sampled quantities.
pub struct ScriptedSource {
    values: Vec<u64>,
    next:   usize,
}

impl ScriptedSource {
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: Vec<u64>) -> Self {
        assert!(!values.is_empty(), "ScriptedSource needs at least one value");
        Self { values, next: 0 }
    }
}

impl UniformSource for ScriptedSource {
    fn uniform_int(&mut self, low: u64, high: u64) -> u64 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v.clamp(low, high)
    }
}
