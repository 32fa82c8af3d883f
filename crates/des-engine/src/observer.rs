//! Simulation observer trait for progress reporting and data collection.

use des_core::{ProcessId, SimTime};

use crate::{EngineError, Wake};

/// How a process left the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// The body returned [`Step::Done`][crate::Step::Done].
    Completed,
    /// The body (or one of its requests) failed with a non-fatal error.
    Failed(EngineError),
}

/// Callbacks invoked by [`Environment::run`][crate::Environment::run] at key
/// points in the event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: resumption counter
///
/// ```rust,ignore
/// struct Counter { resumes: usize }
///
/// impl<S> SimObserver<S> for Counter {
///     fn on_resume(&mut self, _now: SimTime, _pid: ProcessId, _wake: &Wake) {
///         self.resumes += 1;
///     }
/// }
/// ```
pub trait SimObserver<S> {
    /// Called just before a process body is resumed.
    fn on_resume(&mut self, _now: SimTime, _pid: ProcessId, _wake: &Wake) {}

    /// Called once per process when it terminates.
    fn on_process_end(
        &mut self,
        _now:     SimTime,
        _pid:     ProcessId,
        _name:    &str,
        _outcome: &ProcessOutcome,
    ) {}

    /// Called once after the run reaches its horizon or drains the queue.
    ///
    /// Provides read-only access to the scenario state so exporters can
    /// persist whatever the scenario recorded.
    fn on_sim_end(&mut self, _now: SimTime, _state: &S) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl<S> SimObserver<S> for NoopObserver {}
