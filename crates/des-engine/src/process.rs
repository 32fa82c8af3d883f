//! The `Process` trait — the main extension point for scenario code.

use crate::{Context, EngineResult, Step, Wake};

/// A cooperatively scheduled logical thread of control.
///
/// A process is an explicit state machine: the environment calls
/// [`resume`][Self::resume] with the reason it woke up, the process advances
/// its local state, and returns the next [`Step`].  Local state (a plane's
/// required fuel, a generator's counter, …) lives in the implementing struct
/// between suspensions.
///
/// `S` is the scenario's shared state, reachable through
/// [`Context::state`] / [`Context::state_mut`].
///
/// # Example
///
/// ```rust,ignore
/// struct Sleeper { naps: u32 }
///
/// impl<S> Process<S> for Sleeper {
///     fn name(&self) -> &str { "sleeper" }
///
///     fn resume(&mut self, _wake: Wake, _ctx: &mut Context<'_, S>) -> EngineResult<Step> {
///         if self.naps == 0 {
///             return Ok(Step::Done);
///         }
///         self.naps -= 1;
///         Ok(Step::Wait(Condition::Timeout(5.0)))
///     }
/// }
/// ```
pub trait Process<S>: 'static {
    /// Human-readable name used in logs and observer callbacks.
    fn name(&self) -> &str;

    /// Advance the process from one suspension point to the next.
    ///
    /// Returning `Err` terminates the process.  Whether the error also
    /// aborts the run is decided by [`EngineError::is_fatal`][crate::EngineError::is_fatal].
    fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, S>) -> EngineResult<Step>;
}
