//! One row of run output per refueled plane.

use serde::{Deserialize, Serialize};

/// A completed refueling.
///
/// Records are appended in completion order and never modified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Instant the plane finished refueling, in seconds.
    pub entry_time:  f64,
    /// Seconds from arrival until the plane's tank was full: queueing for a
    /// pump, waiting for fuel, and the refuel itself.
    pub duration:    f64,
    pub fuel_litres: f64,
}
