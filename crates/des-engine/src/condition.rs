//! Wait conditions a process can yield, and the wake values it resumes with.

use des_core::{ProcessId, ResourceId, StoreId};

/// What a suspended process is waiting for.
///
/// Produced by [`Process::resume`][crate::Process::resume] inside
/// [`Step::Wait`] and dispatched by the environment with an exhaustive
/// `match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Resume after `delay` simulated seconds.
    ///
    /// A negative delay is rejected with `InvalidDelay` and aborts the run.
    Timeout(f64),

    /// Resume once a slot of the counted resource is granted.
    ///
    /// The slot stays held until [`Context::release`][crate::Context::release]
    /// or until the process terminates, whichever comes first.
    Request(ResourceId),

    /// Resume once `amount` has been taken from the store.
    Get(StoreId, f64),

    /// Resume once `amount` has been added to the store.
    Put(StoreId, f64),

    /// Resume once the given process has terminated.
    Join(ProcessId),
}

/// Why a process is being resumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wake {
    /// First resumption after [`Context::spawn`][crate::Context::spawn].
    Start,

    /// A [`Condition::Timeout`] elapsed.
    Timeout,

    /// A [`Condition::Request`] was granted.
    Granted(ResourceId),

    /// A [`Condition::Get`] was served.
    Got { store: StoreId, amount: f64 },

    /// A [`Condition::Put`] was served.
    Stored { store: StoreId, amount: f64 },

    /// A [`Condition::Join`] target terminated.
    Joined(ProcessId),
}

/// Result of one resumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Suspend until the condition is satisfied.
    Wait(Condition),

    /// The process body has completed.
    Done,
}
