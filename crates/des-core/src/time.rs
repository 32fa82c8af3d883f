//! Simulation time model.
//!
//! # Design
//!
//! Time is a continuous, non-negative number of simulated seconds wrapped in
//! [`SimTime`].  Unlike a raw `f64`, a `SimTime` is always finite and never
//! negative, which lets it implement `Ord` (via `f64::total_cmp`) and serve
//! directly as a `BTreeMap` key in the event queue.
//!
//! The [`Clock`] owns the current instant.  Only the environment's run loop
//! moves it forward; every other component reads it.

use std::cmp::Ordering;
use std::fmt;

use crate::{DesError, DesResult};

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute instant in simulated seconds.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap `secs`, rejecting negative and non-finite values.
    pub fn new(secs: f64) -> DesResult<SimTime> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(DesError::InvalidDelay(secs));
        }
        // `+ 0.0` folds -0.0 into 0.0 so the total order stays intuitive.
        Ok(SimTime(secs + 0.0))
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Return the instant `delay` seconds after `self`.
    ///
    /// Fails with [`DesError::InvalidDelay`] for negative or non-finite
    /// delays.
    pub fn offset(self, delay: f64) -> DesResult<SimTime> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(DesError::InvalidDelay(delay));
        }
        SimTime::new(self.0 + delay)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is
    /// actually later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} s", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Holds the current simulated instant.
///
/// One clock per environment; there is no process-wide singleton, so any
/// number of independent environments can coexist in one test binary.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    now: SimTime,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `time`.
    ///
    /// # Panics
    /// Panics in debug mode if `time` is earlier than the current instant.
    #[inline]
    pub fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.now, "clock moved backwards: {} -> {}", self.now, time);
        self.now = time;
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.now)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration shared by every scenario.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Stop instant.  `None` runs until no events remain.
    pub horizon: Option<SimTime>,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl RunConfig {
    /// Build a config with a horizon given in seconds.
    pub fn with_horizon_secs(horizon_secs: f64, seed: u64) -> DesResult<Self> {
        Ok(Self {
            horizon: Some(SimTime::new(horizon_secs)?),
            seed,
        })
    }
}
