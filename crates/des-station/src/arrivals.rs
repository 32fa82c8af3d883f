//! Source of planes.

use des_core::{ResourceId, StoreId};
use des_engine::{Condition, Context, EngineResult, Process, Step, Wake};

use crate::{Plane, StationState};

/// Sleeps a uniformly drawn whole number of seconds, then spawns the next
/// [`Plane`] without waiting for it.  Planes are numbered from 0.
pub struct ArrivalGenerator {
    pumps:     ResourceId,
    reservoir: StoreId,
    next:      u64,
}

impl ArrivalGenerator {
    pub fn new(pumps: ResourceId, reservoir: StoreId) -> Self {
        Self { pumps, reservoir, next: 0 }
    }
}

impl Process<StationState> for ArrivalGenerator {
    fn name(&self) -> &str {
        "Plane generator"
    }

    fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, StationState>) -> EngineResult<Step> {
        if wake == Wake::Timeout {
            ctx.spawn(Plane::new(self.next, self.pumps, self.reservoir));
            self.next += 1;
        }
        let (min, max) = {
            let cfg = &ctx.state().config;
            (cfg.arrival_min_secs, cfg.arrival_max_secs)
        };
        let gap = ctx.state_mut().draw(min, max);
        Ok(Step::Wait(Condition::Timeout(gap as f64)))
    }
}
