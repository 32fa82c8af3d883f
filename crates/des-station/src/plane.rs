//! A plane that queues for a pump and refuels from the reservoir.

use tracing::debug;

use des_core::{ResourceId, SimTime, StoreId};
use des_engine::{Condition, Context, EngineResult, Process, Step, Wake};

use crate::{CompletionRecord, StationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Arriving,
    AwaitingPump,
    AwaitingFuel,
    Refuelling,
}

/// Lifecycle: arrive → hold a pump → draw `required` litres → refuel for
/// `required / refuel_rate` seconds → release the pump → record.
///
/// If the reservoir can never hold `required` litres the fuel request fails
/// and the plane leaves without a record; its pump is returned on exit.
pub struct Plane {
    name:       String,
    pumps:      ResourceId,
    reservoir:  StoreId,
    stage:      Stage,
    required:   f64,
    arrived_at: SimTime,
    fuelled_at: SimTime,
}

impl Plane {
    pub fn new(index: u64, pumps: ResourceId, reservoir: StoreId) -> Self {
        Self {
            name: format!("Plane {index}"),
            pumps,
            reservoir,
            stage: Stage::Arriving,
            required: 0.0,
            arrived_at: SimTime::ZERO,
            fuelled_at: SimTime::ZERO,
        }
    }

    /// Litres requested from the reservoir.  Zero until the plane arrives.
    pub fn required(&self) -> f64 {
        self.required
    }
}

impl Process<StationState> for Plane {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, StationState>) -> EngineResult<Step> {
        match self.stage {
            Stage::Arriving => {
                let (min, max, tank) = {
                    let cfg = &ctx.state().config;
                    (cfg.plane_fill_min, cfg.plane_fill_max, cfg.plane_tank_size)
                };
                let target = ctx.state_mut().draw(min, max);
                self.required = tank - target as f64;
                self.arrived_at = ctx.now();
                ctx.state_mut().planes_arrived += 1;
                debug!(now = %ctx.now(), plane = %self.name, required = self.required, "arrived at station");

                self.stage = Stage::AwaitingPump;
                Ok(Step::Wait(Condition::Request(self.pumps)))
            }

            Stage::AwaitingPump => {
                self.stage = Stage::AwaitingFuel;
                Ok(Step::Wait(Condition::Get(self.reservoir, self.required)))
            }

            Stage::AwaitingFuel => {
                debug_assert!(matches!(wake, Wake::Got { .. }), "unexpected wake {wake:?}");
                self.fuelled_at = ctx.now();
                self.stage = Stage::Refuelling;
                let rate = ctx.state().config.refuel_rate;
                Ok(Step::Wait(Condition::Timeout(self.required / rate)))
            }

            Stage::Refuelling => {
                ctx.release(self.pumps)?;

                let refuel_secs = self.required / ctx.state().config.refuel_rate;
                // Summing the two legs keeps an unqueued plane's duration
                // exactly equal to its refuel time.
                let record = CompletionRecord {
                    entry_time:  ctx.now().as_secs(),
                    duration:    self.fuelled_at.since(self.arrived_at) + refuel_secs,
                    fuel_litres: self.required,
                };
                ctx.state_mut().records.push(record);
                debug!(now = %ctx.now(), plane = %self.name, litres = self.required, "refueled");
                Ok(Step::Done)
            }
        }
    }
}
