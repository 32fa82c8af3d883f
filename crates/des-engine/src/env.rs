//! The `Environment` struct and its event loop.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use des_core::{DesError, EventId, ProcessId, ResourceId, SimTime, StoreId};

use crate::store::{Served, StoreOp};
use crate::{
    Condition, Context, CountedResource, EngineError, EngineResult, EventQueue, Process,
    ProcessOutcome, QuantityStore, SimObserver, Step, Wake,
};

// ── Queue payloads ────────────────────────────────────────────────────────────

type Callback<S> = Box<dyn FnOnce(&mut Environment<S>) -> EngineResult<()>>;

pub(crate) enum Action<S: 'static> {
    /// Resume a suspended process with the reason it woke up.
    Resume(ProcessId, Wake),
    /// Run a one-shot closure against the environment.
    Callback(Callback<S>),
}

struct ProcessSlot<S: 'static> {
    name:    String,
    /// `None` only while the body is being resumed.
    body:    Option<Box<dyn Process<S>>>,
    /// Processes blocked on `Condition::Join` for this one.
    joiners: Vec<ProcessId>,
}

/// A process that terminated with a non-fatal error.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessFailure {
    pub pid:   ProcessId,
    pub name:  String,
    pub at:    SimTime,
    pub error: EngineError,
}

/// Counters reported by [`Environment::run`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub end_time:          SimTime,
    pub events_dispatched: u64,
    pub processes_spawned: u64,
    pub processes_failed:  usize,
    /// Processes still suspended when the run stopped.  They are abandoned.
    pub processes_alive:   usize,
}

// ── Environment ───────────────────────────────────────────────────────────────

/// The scheduler: owns the clock, the event queue, every process, and every
/// shared resource.
///
/// The loop is strictly single-threaded.  Each dispatched event resumes at
/// most one process, and shared resources are only mutated from inside that
/// dispatch, so FIFO ordering (not locking) is what keeps them consistent.
///
/// Create via [`EnvironmentBuilder`][crate::EnvironmentBuilder].
pub struct Environment<S: 'static> {
    queue:     EventQueue<Action<S>>,
    processes: FxHashMap<ProcessId, ProcessSlot<S>>,
    finished:  FxHashSet<ProcessId>,
    /// Pending callback events; only these may be cancelled.
    callbacks: FxHashSet<EventId>,
    resources: Vec<CountedResource>,
    stores:    Vec<QuantityStore>,
    failures:  Vec<ProcessFailure>,
    state:     S,
    next_pid:  u64,
    dispatched: u64,
}

impl<S: 'static> Environment<S> {
    pub(crate) fn from_parts(
        state:     S,
        resources: Vec<CountedResource>,
        stores:    Vec<QuantityStore>,
    ) -> Self {
        Self {
            queue:      EventQueue::new(),
            processes:  FxHashMap::default(),
            finished:   FxHashSet::default(),
            callbacks:  FxHashSet::default(),
            resources,
            stores,
            failures:   Vec::new(),
            state,
            next_pid:   0,
            dispatched: 0,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the queue is empty or the next event is at or beyond
    /// `until`.  The clock is then parked at `until`.
    ///
    /// Events scheduled exactly at the horizon are left undispatched.
    /// Processes still suspended at that point are abandoned without any
    /// cleanup.
    ///
    /// # Errors
    /// A fatal error (invalid delay or amount, resource misuse, unknown id)
    /// aborts the run immediately and is returned unchanged.  Non-fatal
    /// process failures are collected in [`failures`][Self::failures].
    pub fn run<O: SimObserver<S>>(
        &mut self,
        until:    Option<SimTime>,
        observer: &mut O,
    ) -> EngineResult<RunSummary> {
        loop {
            let Some(next) = self.queue.peek_time() else {
                break;
            };
            if until.is_some_and(|horizon| next >= horizon) {
                break;
            }
            self.dispatch_next(observer)?;
        }
        if let Some(horizon) = until {
            self.queue.advance_to(horizon);
        }

        observer.on_sim_end(self.now(), &self.state);
        Ok(self.summary())
    }

    /// Dispatch exactly one event.  Returns `false` if the queue was empty.
    pub fn step<O: SimObserver<S>>(&mut self, observer: &mut O) -> EngineResult<bool> {
        if self.queue.is_empty() {
            return Ok(false);
        }
        self.dispatch_next(observer)?;
        Ok(true)
    }

    /// Register `process` and schedule its first resumption now.
    pub fn spawn<P: Process<S>>(&mut self, process: P) -> ProcessId {
        let pid = ProcessId(self.next_pid);
        self.next_pid += 1;
        let name = process.name().to_owned();
        trace!(%pid, %name, "spawn");
        self.processes.insert(pid, ProcessSlot {
            name,
            body:    Some(Box::new(process)),
            joiners: Vec::new(),
        });
        self.queue.schedule_now(Action::Resume(pid, Wake::Start));
        pid
    }

    /// Run `callback` against the environment `delay` seconds from now.
    pub fn schedule_callback<F>(&mut self, delay: f64, callback: F) -> EngineResult<EventId>
    where
        F: FnOnce(&mut Environment<S>) -> EngineResult<()> + 'static,
    {
        let id = self.queue.schedule(delay, Action::Callback(Box::new(callback)))?;
        self.callbacks.insert(id);
        Ok(id)
    }

    /// Cancel a pending callback.  Process wake-ups cannot be cancelled;
    /// returns `false` for them and for events that already fired.
    pub fn cancel(&mut self, event: EventId) -> bool {
        self.callbacks.remove(&event) && self.queue.cancel(event)
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    pub fn into_state(self) -> S {
        self.state
    }

    pub fn resource(&self, id: ResourceId) -> EngineResult<&CountedResource> {
        self.resources
            .get(id.index())
            .ok_or(EngineError::Des(DesError::UnknownResource(id)))
    }

    pub fn store(&self, id: StoreId) -> EngineResult<&QuantityStore> {
        self.stores
            .get(id.index())
            .ok_or(EngineError::Des(DesError::UnknownStore(id)))
    }

    /// Processes that terminated with a non-fatal error, in failure order.
    pub fn failures(&self) -> &[ProcessFailure] {
        &self.failures
    }

    /// `true` while `pid` has been spawned and not yet terminated.
    pub fn is_alive(&self, pid: ProcessId) -> bool {
        self.processes.contains_key(&pid)
    }

    /// Number of pending events.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            end_time:          self.now(),
            events_dispatched: self.dispatched,
            processes_spawned: self.next_pid,
            processes_failed:  self.failures.len(),
            processes_alive:   self.processes.len(),
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch_next<O: SimObserver<S>>(&mut self, observer: &mut O) -> EngineResult<()> {
        let Some((now, id, action)) = self.queue.pop() else {
            return Ok(());
        };
        self.dispatched += 1;

        match action {
            Action::Resume(pid, wake) => self.resume(pid, wake, observer),
            Action::Callback(callback) => {
                self.callbacks.remove(&id);
                trace!(%now, event = %id, "callback");
                callback(self)
            }
        }
    }

    fn resume<O: SimObserver<S>>(
        &mut self,
        pid:      ProcessId,
        wake:     Wake,
        observer: &mut O,
    ) -> EngineResult<()> {
        let mut body = self
            .processes
            .get_mut(&pid)
            .and_then(|slot| slot.body.take())
            .ok_or(EngineError::Des(DesError::UnknownProcess(pid)))?;

        observer.on_resume(self.now(), pid, &wake);
        let result = body.resume(wake, &mut Context::new(self, pid));

        let step = match result {
            Ok(step) => step,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                self.terminate(pid, ProcessOutcome::Failed(e), observer)?;
                return Ok(());
            }
        };

        match step {
            Step::Done => self.terminate(pid, ProcessOutcome::Completed, observer),
            Step::Wait(condition) => {
                if let Some(slot) = self.processes.get_mut(&pid) {
                    slot.body = Some(body);
                }
                match self.wait(pid, condition) {
                    Ok(()) => Ok(()),
                    Err(e) if e.is_fatal() => Err(e),
                    Err(e) => self.terminate(pid, ProcessOutcome::Failed(e), observer),
                }
            }
        }
    }

    /// Register `pid` as a waiter on `condition`, scheduling its wake-up at
    /// once if the condition is already satisfied.
    fn wait(&mut self, pid: ProcessId, condition: Condition) -> EngineResult<()> {
        match condition {
            Condition::Timeout(delay) => {
                self.queue.schedule(delay, Action::Resume(pid, Wake::Timeout))?;
            }

            Condition::Request(id) => {
                let resource = self
                    .resources
                    .get_mut(id.index())
                    .ok_or(DesError::UnknownResource(id))?;
                if resource.request(pid) {
                    self.queue.schedule_now(Action::Resume(pid, Wake::Granted(id)));
                } else {
                    trace!(%pid, resource = %id, queued = resource.queue_len(), "request queued");
                }
            }

            Condition::Get(id, amount) => {
                let served = self
                    .stores
                    .get_mut(id.index())
                    .ok_or(DesError::UnknownStore(id))?
                    .get(pid, amount)?;
                self.wake_served(id, served);
            }

            Condition::Put(id, amount) => {
                let served = self
                    .stores
                    .get_mut(id.index())
                    .ok_or(DesError::UnknownStore(id))?
                    .put(pid, amount)?;
                self.wake_served(id, served);
            }

            Condition::Join(target) => {
                if target == pid {
                    return Err(EngineError::Config(format!("{pid} cannot join itself")));
                }
                if self.finished.contains(&target) {
                    self.queue.schedule_now(Action::Resume(pid, Wake::Joined(target)));
                } else {
                    self.processes
                        .get_mut(&target)
                        .ok_or(DesError::UnknownProcess(target))?
                        .joiners
                        .push(pid);
                }
            }
        }
        Ok(())
    }

    fn wake_served(&mut self, store: StoreId, served: Vec<Served>) {
        for Served { process, op, amount } in served {
            let wake = match op {
                StoreOp::Get => Wake::Got { store, amount },
                StoreOp::Put => Wake::Stored { store, amount },
            };
            self.queue.schedule_now(Action::Resume(process, wake));
        }
    }

    pub(crate) fn release(&mut self, pid: ProcessId, id: ResourceId) -> EngineResult<()> {
        let next = self
            .resources
            .get_mut(id.index())
            .ok_or(DesError::UnknownResource(id))?
            .release(pid)?;
        if let Some(next) = next {
            self.queue.schedule_now(Action::Resume(next, Wake::Granted(id)));
        }
        Ok(())
    }

    /// Remove a process, hand back any slots it still holds, and wake its
    /// joiners.
    fn terminate<O: SimObserver<S>>(
        &mut self,
        pid:      ProcessId,
        outcome:  ProcessOutcome,
        observer: &mut O,
    ) -> EngineResult<()> {
        let Some(slot) = self.processes.remove(&pid) else {
            return Err(DesError::UnknownProcess(pid).into());
        };
        self.finished.insert(pid);

        for index in 0..self.resources.len() {
            let id = self.resources[index].id();
            while self.resources[index].held_by(pid) > 0 {
                debug!(%pid, resource = %id, "releasing slot held at exit");
                self.release(pid, id)?;
            }
        }

        for joiner in slot.joiners {
            self.queue.schedule_now(Action::Resume(joiner, Wake::Joined(pid)));
        }

        let now = self.now();
        match &outcome {
            ProcessOutcome::Completed => trace!(%pid, name = %slot.name, "completed"),
            ProcessOutcome::Failed(error) => {
                warn!(%pid, name = %slot.name, %now, %error, "process failed");
                self.failures.push(ProcessFailure {
                    pid,
                    name:  slot.name.clone(),
                    at:    now,
                    error: error.clone(),
                });
            }
        }
        observer.on_process_end(now, pid, &slot.name, &outcome);
        Ok(())
    }
}

impl<S: 'static> std::fmt::Display for Environment<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Environment at {} ({} live processes, {} pending events)",
            self.now(),
            self.processes.len(),
            self.queue.len()
        )
    }
}
