//! Reservoir watchdog.

use tracing::debug;

use des_core::StoreId;
use des_engine::{Condition, Context, EngineResult, Process, Step, Wake};

use crate::{StationState, Truck};

/// Polls the reservoir every `check_interval_secs`.  When the level is
/// strictly below the threshold it calls a [`Truck`] and waits for it to
/// finish before polling again, so at most one truck is ever on the road.
///
/// Runs until the horizon.
pub struct Controller {
    reservoir: StoreId,
}

impl Controller {
    pub fn new(reservoir: StoreId) -> Self {
        Self { reservoir }
    }
}

impl Process<StationState> for Controller {
    fn name(&self) -> &str {
        "Station control"
    }

    fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, StationState>) -> EngineResult<Step> {
        let interval = ctx.state().config.check_interval_secs;
        if let Wake::Joined(_) = wake {
            return Ok(Step::Wait(Condition::Timeout(interval)));
        }

        let pct = ctx.store(self.reservoir)?.fill_pct();
        if pct < ctx.state().config.threshold_pct {
            let now = ctx.now();
            debug!(now = %now, fill_pct = pct, "calling tank truck");
            let state = ctx.state_mut();
            state.trucks_called += 1;
            state.last_truck_call = Some(now);
            let truck = ctx.spawn(Truck::new(self.reservoir));
            return Ok(Step::Wait(Condition::Join(truck)));
        }
        Ok(Step::Wait(Condition::Timeout(interval)))
    }
}
