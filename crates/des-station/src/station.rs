//! Scenario assembly and the top-level run entry point.

use tracing::info;

use des_core::{ResourceId, SimRng, StoreId, UniformSource};
use des_engine::{Environment, EnvironmentBuilder, ProcessFailure, RunSummary, SimObserver};

use crate::{ArrivalGenerator, CompletionRecord, Controller, StationConfig, StationResult, StationState};

/// Ids of the shared resources inside a built station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationHandles {
    pub pumps:     ResourceId,
    pub reservoir: StoreId,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct StationReport {
    pub summary:        RunSummary,
    pub records:        Vec<CompletionRecord>,
    pub final_level:    f64,
    pub planes_arrived: u64,
    pub trucks_called:  u64,
    /// Planes that left without fuel (request larger than the reservoir).
    pub failures:       Vec<ProcessFailure>,
}

/// Validate `config`, declare the pump pool and reservoir, and spawn the
/// controller followed by the arrival generator.
///
/// Draws go through `source`; pass a [`SimRng`] for normal runs or a
/// scripted source in tests.
pub fn build_station(
    config: &StationConfig,
    source: Box<dyn UniformSource>,
) -> StationResult<(Environment<StationState>, StationHandles)> {
    config.validate()?;

    let mut builder = EnvironmentBuilder::new(StationState::new(config.clone(), source));
    let handles = StationHandles {
        pumps:     builder.resource(config.pump_count),
        reservoir: builder.store(config.reservoir_capacity, config.reservoir_initial),
    };
    let mut env = builder.build()?;

    env.spawn(Controller::new(handles.reservoir));
    env.spawn(ArrivalGenerator::new(handles.pumps, handles.reservoir));
    Ok((env, handles))
}

/// Build the station seeded from `config.seed` and run it to
/// `config.horizon_secs`.
pub fn run_station<O: SimObserver<StationState>>(
    config:   &StationConfig,
    observer: &mut O,
) -> StationResult<StationReport> {
    let run = config.run_config()?;
    let (mut env, handles) = build_station(config, Box::new(SimRng::new(run.seed)))?;

    info!(
        seed = run.seed,
        horizon = config.horizon_secs,
        pumps = config.pump_count,
        "starting station run"
    );
    let summary = env.run(run.horizon, observer)?;

    let final_level = env.store(handles.reservoir)?.level();
    let failures = env.failures().to_vec();
    let state = env.into_state();
    info!(
        end = %summary.end_time,
        events = summary.events_dispatched,
        planes = state.planes_arrived,
        refueled = state.records.len(),
        trucks = state.trucks_called,
        "station run finished"
    );

    Ok(StationReport {
        summary,
        records: state.records,
        final_level,
        planes_arrived: state.planes_arrived,
        trucks_called: state.trucks_called,
        failures,
    })
}
