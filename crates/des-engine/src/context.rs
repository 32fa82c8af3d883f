//! The handle a process body uses to talk to its environment.

use des_core::{EventId, ProcessId, ResourceId, SimTime, StoreId};

use crate::{CountedResource, EngineResult, Environment, Process, QuantityStore};

/// Mutable view of the environment handed to [`Process::resume`].
///
/// The resumed process itself is detached from the environment for the
/// duration of the call, so the context can hand out `&mut` access to
/// everything else (scenario state, spawning, releasing slots) without
/// aliasing.
///
/// # Lifetimes
///
/// The borrow lives for exactly one resumption.  Processes must not try to
/// keep references obtained here across suspension points; copy out the
/// numbers they need instead.
pub struct Context<'a, S: 'static> {
    env: &'a mut Environment<S>,
    pid: ProcessId,
}

impl<'a, S: 'static> Context<'a, S> {
    pub(crate) fn new(env: &'a mut Environment<S>, pid: ProcessId) -> Self {
        Self { env, pid }
    }

    /// Current simulated instant.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.env.now()
    }

    /// Id of the process being resumed.
    #[inline]
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn state(&self) -> &S {
        self.env.state()
    }

    pub fn state_mut(&mut self) -> &mut S {
        self.env.state_mut()
    }

    /// Register `process` and schedule its first resumption at the current
    /// instant.  The caller keeps running; use [`Condition::Join`][crate::Condition::Join]
    /// to wait for the child.
    pub fn spawn<P: Process<S>>(&mut self, process: P) -> ProcessId {
        self.env.spawn(process)
    }

    /// Return one slot of `resource` held by this process.
    ///
    /// Fails with `ResourceMisuse` if the process holds none.
    pub fn release(&mut self, resource: ResourceId) -> EngineResult<()> {
        self.env.release(self.pid, resource)
    }

    pub fn resource(&self, id: ResourceId) -> EngineResult<&CountedResource> {
        self.env.resource(id)
    }

    pub fn store(&self, id: StoreId) -> EngineResult<&QuantityStore> {
        self.env.store(id)
    }

    /// Run `callback` against the environment `delay` seconds from now.
    pub fn schedule_callback<F>(&mut self, delay: f64, callback: F) -> EngineResult<EventId>
    where
        F: FnOnce(&mut Environment<S>) -> EngineResult<()> + 'static,
    {
        self.env.schedule_callback(delay, callback)
    }

    /// Cancel a pending callback.  See [`Environment::cancel`].
    pub fn cancel(&mut self, event: EventId) -> bool {
        self.env.cancel(event)
    }
}
