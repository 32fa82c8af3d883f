//! Scenario state shared by every station process.

use des_core::{SimTime, UniformSource};

use crate::{CompletionRecord, StationConfig};

/// Owned by the [`Environment`][des_engine::Environment]; processes reach it
/// through their `Context`.
pub struct StationState {
    pub config:          StationConfig,
    pub records:         Vec<CompletionRecord>,
    pub planes_arrived:  u64,
    pub trucks_called:   u64,
    /// When the controller last found the reservoir below threshold.
    pub last_truck_call: Option<SimTime>,
    source:              Box<dyn UniformSource>,
}

impl StationState {
    pub fn new(config: StationConfig, source: Box<dyn UniformSource>) -> Self {
        Self {
            config,
            records: Vec::new(),
            planes_arrived: 0,
            trucks_called: 0,
            last_truck_call: None,
            source,
        }
    }

    /// Draw from the scenario's random source, inclusive on both ends.
    #[inline]
    pub fn draw(&mut self, low: u64, high: u64) -> u64 {
        self.source.uniform_int(low, high)
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }
}

impl std::fmt::Debug for StationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationState")
            .field("records", &self.records.len())
            .field("planes_arrived", &self.planes_arrived)
            .field("trucks_called", &self.trucks_called)
            .field("last_truck_call", &self.last_truck_call)
            .finish_non_exhaustive()
    }
}
