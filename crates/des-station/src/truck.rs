//! The tank truck that tops up the reservoir.

use tracing::debug;

use des_core::StoreId;
use des_engine::{Condition, Context, EngineError, EngineResult, Process, Step, Wake};

use crate::StationState;

/// Drives for `truck_delay_secs`, then fills the reservoir back to capacity.
///
/// The top-up amount is measured on arrival, not when the truck is called.
pub struct Truck {
    reservoir: StoreId,
}

impl Truck {
    pub fn new(reservoir: StoreId) -> Self {
        Self { reservoir }
    }
}

impl Process<StationState> for Truck {
    fn name(&self) -> &str {
        "Tank truck"
    }

    fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, StationState>) -> EngineResult<Step> {
        match wake {
            Wake::Start => {
                let delay = ctx.state().config.truck_delay_secs;
                Ok(Step::Wait(Condition::Timeout(delay)))
            }
            Wake::Timeout => {
                let amount = ctx.store(self.reservoir)?.headroom();
                Ok(Step::Wait(Condition::Put(self.reservoir, amount)))
            }
            Wake::Stored { amount, .. } => {
                debug!(now = %ctx.now(), litres = amount, "tank truck refilled reservoir");
                Ok(Step::Done)
            }
            other => Err(EngineError::Config(format!("tank truck woken by {other:?}"))),
        }
    }
}
