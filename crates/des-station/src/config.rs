//! Scenario parameters.
//!
//! # JSON format
//!
//! Every field is optional; missing fields take the defaults below.
//!
//! ```json
//! {
//!   "reservoir_capacity": 700000,
//!   "threshold_pct": 25,
//!   "pump_count": 2,
//!   "arrival_min_secs": 4000,
//!   "arrival_max_secs": 8000,
//!   "seed": 42
//! }
//! ```
//!
//! | Field                 | Default   | Unit        |
//! |-----------------------|-----------|-------------|
//! | `reservoir_capacity`  | 700 000   | litres      |
//! | `reservoir_initial`   | 700 000   | litres      |
//! | `threshold_pct`       | 25        | % of full   |
//! | `pump_count`          | 2         | pumps       |
//! | `plane_tank_size`     | 150 000   | litres      |
//! | `plane_fill_min`      | 30 000    | litres      |
//! | `plane_fill_max`      | 100 000   | litres      |
//! | `refuel_rate`         | 1 600     | litres / s  |
//! | `truck_delay_secs`    | 1 000     | s           |
//! | `check_interval_secs` | 10        | s           |
//! | `arrival_min_secs`    | 4 000     | s           |
//! | `arrival_max_secs`    | 8 000     | s           |
//! | `horizon_secs`        | 1 000 000 | s           |
//! | `seed`                | 42        |             |

use std::path::Path;

use serde::{Deserialize, Serialize};

use des_core::RunConfig;

use crate::{StationError, StationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StationConfig {
    pub reservoir_capacity:  f64,
    pub reservoir_initial:   f64,
    /// The controller calls a truck when the level drops strictly below
    /// this percentage of capacity.
    pub threshold_pct:       f64,
    pub pump_count:          usize,
    pub plane_tank_size:     f64,
    /// Inclusive range of fuel already in an arriving plane's tank.
    pub plane_fill_min:      u64,
    pub plane_fill_max:      u64,
    pub refuel_rate:         f64,
    pub truck_delay_secs:    f64,
    pub check_interval_secs: f64,
    /// Inclusive range of whole seconds between consecutive arrivals.
    pub arrival_min_secs:    u64,
    pub arrival_max_secs:    u64,
    pub horizon_secs:        f64,
    pub seed:                u64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            reservoir_capacity:  700_000.0,
            reservoir_initial:   700_000.0,
            threshold_pct:       25.0,
            pump_count:          2,
            plane_tank_size:     150_000.0,
            plane_fill_min:      30_000,
            plane_fill_max:      100_000,
            refuel_rate:         1_600.0,
            truck_delay_secs:    1_000.0,
            check_interval_secs: 10.0,
            arrival_min_secs:    4_000,
            arrival_max_secs:    8_000,
            horizon_secs:        1_000_000.0,
            seed:                42,
        }
    }
}

impl StationConfig {
    /// Load a config from a JSON file.  The result is validated.
    pub fn from_json_path(path: &Path) -> StationResult<Self> {
        let file = std::fs::File::open(path)?;
        let config: StationConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json_path`][Self::from_json_path] but parses a string.
    pub fn from_json_str(json: &str) -> StationResult<Self> {
        let config: StationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a runnable scenario.
    pub fn validate(&self) -> StationResult<()> {
        let positive = [
            ("reservoir_capacity",  self.reservoir_capacity),
            ("plane_tank_size",     self.plane_tank_size),
            ("refuel_rate",         self.refuel_rate),
            ("check_interval_secs", self.check_interval_secs),
            ("horizon_secs",        self.horizon_secs),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !self.truck_delay_secs.is_finite() || self.truck_delay_secs < 0.0 {
            return Err(invalid(format!(
                "truck_delay_secs must be non-negative, got {}",
                self.truck_delay_secs
            )));
        }
        if !(0.0..=self.reservoir_capacity).contains(&self.reservoir_initial) {
            return Err(invalid(format!(
                "reservoir_initial {} outside [0, {}]",
                self.reservoir_initial, self.reservoir_capacity
            )));
        }
        if !(0.0..=100.0).contains(&self.threshold_pct) {
            return Err(invalid(format!(
                "threshold_pct must be within [0, 100], got {}",
                self.threshold_pct
            )));
        }
        if self.pump_count == 0 {
            return Err(invalid("pump_count must be at least 1".into()));
        }
        if self.plane_fill_min > self.plane_fill_max {
            return Err(invalid(format!(
                "plane fill range is empty: [{}, {}]",
                self.plane_fill_min, self.plane_fill_max
            )));
        }
        if self.plane_fill_max as f64 > self.plane_tank_size {
            return Err(invalid(format!(
                "plane_fill_max {} exceeds plane_tank_size {}",
                self.plane_fill_max, self.plane_tank_size
            )));
        }
        if self.arrival_min_secs > self.arrival_max_secs {
            return Err(invalid(format!(
                "arrival interval range is empty: [{}, {}]",
                self.arrival_min_secs, self.arrival_max_secs
            )));
        }
        if self.arrival_max_secs == 0 {
            return Err(invalid("arrival_max_secs must be positive".into()));
        }
        Ok(())
    }

    /// Horizon and seed as engine run parameters.
    pub fn run_config(&self) -> StationResult<RunConfig> {
        Ok(RunConfig::with_horizon_secs(self.horizon_secs, self.seed)?)
    }

    /// Reservoir level below which the controller calls a truck.
    pub fn threshold_level(&self) -> f64 {
        self.reservoir_capacity * self.threshold_pct / 100.0
    }
}

fn invalid(msg: String) -> StationError {
    StationError::Config(msg)
}
