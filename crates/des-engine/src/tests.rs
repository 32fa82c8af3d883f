//! Unit and integration tests for des-engine.

use std::collections::VecDeque;

use des_core::{DesError, ProcessId, ResourceId, SimTime, StoreId};

use crate::{
    Condition, Context, EngineError, EngineResult, EnvironmentBuilder, NoopObserver, Process,
    ProcessOutcome, SimObserver, Step, Wake,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Every resumption: (instant, process name, wake reason).
type Trace = Vec<(f64, String, Wake)>;

enum Op {
    Wait(Condition),
    Release(ResourceId),
}

/// Replays a fixed list of operations, logging each wake into the trace.
struct Scripted {
    name: String,
    ops:  VecDeque<Op>,
}

impl Scripted {
    fn new(name: &str, ops: Vec<Op>) -> Self {
        Self { name: name.to_owned(), ops: ops.into() }
    }
}

impl Process<Trace> for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, Trace>) -> EngineResult<Step> {
        let now = ctx.now().as_secs();
        ctx.state_mut().push((now, self.name.clone(), wake));
        while let Some(op) = self.ops.pop_front() {
            match op {
                Op::Release(r) => ctx.release(r)?,
                Op::Wait(c)    => return Ok(Step::Wait(c)),
            }
        }
        Ok(Step::Done)
    }
}

fn t(secs: f64) -> SimTime {
    SimTime::new(secs).unwrap()
}

/// Instants at which `name` received a wake matching `pred`.
fn wakes(trace: &Trace, name: &str, pred: impl Fn(&Wake) -> bool) -> Vec<f64> {
    trace
        .iter()
        .filter(|(_, n, w)| n == name && pred(w))
        .map(|(at, _, _)| *at)
        .collect()
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use super::*;
    use crate::EventQueue;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(5.0, "late").unwrap();
        q.schedule(1.0, "early").unwrap();
        q.schedule(3.0, "middle").unwrap();

        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|(_, _, p)| p)).collect();
        assert_eq!(order, ["early", "middle", "late"]);
        assert_eq!(q.now(), t(5.0));
    }

    #[test]
    fn equal_times_are_fifo() {
        let mut q = EventQueue::new();
        for i in 0..5 {
            q.schedule(2.0, i).unwrap();
        }
        let order: Vec<_> = std::iter::from_fn(|| q.pop().map(|(_, _, p)| p)).collect();
        assert_eq!(order, [0, 1, 2, 3, 4]);
        assert_eq!(q.instant_count(), 0);
    }

    #[test]
    fn negative_delay_is_rejected() {
        let mut q: EventQueue<()> = EventQueue::new();
        assert_eq!(q.schedule(-1.0, ()), Err(DesError::InvalidDelay(-1.0)));
        assert!(q.schedule(f64::NAN, ()).is_err());
        assert!(q.is_empty(), "failed schedule must not touch the queue");
    }

    #[test]
    fn schedule_at_past_is_rejected() {
        let mut q = EventQueue::new();
        q.schedule(10.0, 'a').unwrap();
        q.pop();
        assert!(matches!(q.schedule_at(t(4.0), 'b'), Err(DesError::InvalidDelay(_))));
        assert!(q.schedule_at(t(10.0), 'c').is_ok());
    }

    #[test]
    fn cancel_removes_pending_event() {
        let mut q = EventQueue::new();
        let a = q.schedule(1.0, 'a').unwrap();
        let b = q.schedule(1.0, 'b').unwrap();
        assert!(q.cancel(a));
        assert!(!q.cancel(a), "second cancel is a no-op");
        assert!(!q.is_pending(a));
        assert!(q.is_pending(b));
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop().map(|(_, _, p)| p), Some('b'));
        assert!(!q.cancel(b), "fired events cannot be cancelled");
    }

    #[test]
    fn cancel_last_in_bucket_drops_instant() {
        let mut q = EventQueue::new();
        let a = q.schedule(1.0, ()).unwrap();
        q.schedule(2.0, ()).unwrap();
        q.cancel(a);
        assert_eq!(q.peek_time(), Some(t(2.0)));
        assert_eq!(q.instant_count(), 1);
    }

    #[test]
    fn empty_pop_keeps_clock() {
        let mut q: EventQueue<()> = EventQueue::new();
        q.advance_to(t(7.0));
        assert!(q.pop().is_none());
        assert_eq!(q.now(), t(7.0));
        q.advance_to(t(3.0)); // earlier instants are ignored
        assert_eq!(q.now(), t(7.0));
    }
}

// ── CountedResource ───────────────────────────────────────────────────────────

#[cfg(test)]
mod resource_tests {
    use crate::CountedResource;

    use super::*;

    #[test]
    fn grants_up_to_capacity_then_queues() {
        let mut r = CountedResource::new(ResourceId(0), 2);
        assert!(r.request(ProcessId(0)));
        assert!(r.request(ProcessId(1)));
        assert!(!r.request(ProcessId(2)));
        assert!(!r.request(ProcessId(3)));
        assert_eq!(r.granted(), 2);
        assert_eq!(r.queue_len(), 2);
    }

    #[test]
    fn release_hands_slot_to_queue_head() {
        let mut r = CountedResource::new(ResourceId(0), 1);
        r.request(ProcessId(0));
        r.request(ProcessId(1));
        r.request(ProcessId(2));

        assert_eq!(r.release(ProcessId(0)).unwrap(), Some(ProcessId(1)));
        assert_eq!(r.granted(), 1);
        assert_eq!(r.waiting().collect::<Vec<_>>(), [ProcessId(2)]);

        assert_eq!(r.release(ProcessId(1)).unwrap(), Some(ProcessId(2)));
        assert_eq!(r.release(ProcessId(2)).unwrap(), None);
        assert_eq!(r.granted(), 0);
    }

    #[test]
    fn release_without_grant_is_misuse() {
        let mut r = CountedResource::new(ResourceId(4), 1);
        r.request(ProcessId(0));
        r.request(ProcessId(1)); // queued, not granted
        assert_eq!(
            r.release(ProcessId(1)),
            Err(DesError::ResourceMisuse { resource: ResourceId(4), process: ProcessId(1) })
        );
        assert_eq!(r.granted(), 1);
    }

    #[test]
    fn granted_never_exceeds_capacity() {
        let mut r = CountedResource::new(ResourceId(0), 3);
        for i in 0..10 {
            r.request(ProcessId(i));
            assert!(r.granted() <= r.capacity());
        }
        for i in 0..10 {
            r.release(ProcessId(i)).unwrap();
            assert!(r.granted() <= r.capacity());
        }
        assert_eq!(r.granted(), 0);
        assert_eq!(r.queue_len(), 0);
    }
}

// ── QuantityStore ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use crate::{QuantityStore, Served, StoreOp};

    use super::*;

    fn store(capacity: f64, level: f64) -> QuantityStore {
        QuantityStore::new(StoreId(0), capacity, level)
    }

    fn got(p: u64, amount: f64) -> Served {
        Served { process: ProcessId(p), op: StoreOp::Get, amount }
    }

    fn put(p: u64, amount: f64) -> Served {
        Served { process: ProcessId(p), op: StoreOp::Put, amount }
    }

    #[test]
    fn get_within_level_is_immediate() {
        let mut s = store(100.0, 60.0);
        assert_eq!(s.get(ProcessId(0), 25.0).unwrap(), [got(0, 25.0)]);
        assert_eq!(s.level(), 35.0);
    }

    #[test]
    fn get_above_capacity_fails_fast_at_any_level() {
        for level in [0.0, 50.0, 100.0] {
            let mut s = store(100.0, level);
            let err = s.get(ProcessId(0), 101.0).unwrap_err();
            assert_eq!(
                err,
                DesError::UnsatisfiableRequest { store: StoreId(0), amount: 101.0, capacity: 100.0 }
            );
            assert_eq!(s.pending_gets(), 0, "must not block");
            assert_eq!(s.level(), level);
        }
    }

    #[test]
    fn put_above_capacity_fails_fast() {
        let mut s = store(100.0, 0.0);
        assert!(matches!(s.put(ProcessId(0), 100.5), Err(DesError::UnsatisfiableRequest { .. })));
    }

    #[test]
    fn invalid_amounts() {
        let mut s = store(10.0, 5.0);
        assert_eq!(s.get(ProcessId(0), -1.0), Err(DesError::InvalidAmount(-1.0)));
        assert!(matches!(s.put(ProcessId(0), f64::NAN), Err(DesError::InvalidAmount(_))));
    }

    #[test]
    fn zero_amounts_are_noops() {
        let mut s = store(10.0, 10.0);
        // Full store plus a blocked put: put(0) must still succeed at once.
        s.put(ProcessId(9), 5.0).unwrap();
        assert_eq!(s.put(ProcessId(0), 0.0).unwrap(), [put(0, 0.0)]);
        assert_eq!(s.get(ProcessId(1), 0.0).unwrap(), [got(1, 0.0)]);
        assert_eq!(s.level(), 10.0);
        assert_eq!(s.pending_puts(), 1);
    }

    #[test]
    fn head_of_line_blocking_for_gets() {
        let mut s = store(100.0, 10.0);
        assert!(s.get(ProcessId(0), 50.0).unwrap().is_empty());
        // 5 would fit, but an earlier larger get is still waiting.
        assert!(s.get(ProcessId(1), 5.0).unwrap().is_empty());
        assert_eq!(s.level(), 10.0);
        assert_eq!(s.pending_gets(), 2);

        assert_eq!(s.put(ProcessId(2), 40.0).unwrap(), [put(2, 40.0), got(0, 50.0)]);
        assert_eq!(s.level(), 0.0);
        assert_eq!(s.pending_gets(), 1);

        assert_eq!(s.put(ProcessId(3), 5.0).unwrap(), [put(3, 5.0), got(1, 5.0)]);
        assert_eq!(s.level(), 0.0);
    }

    #[test]
    fn put_serves_as_many_gets_as_level_allows() {
        let mut s = store(100.0, 0.0);
        s.get(ProcessId(0), 20.0).unwrap();
        s.get(ProcessId(1), 30.0).unwrap();
        s.get(ProcessId(2), 60.0).unwrap();
        let served = s.put(ProcessId(3), 100.0).unwrap();
        assert_eq!(served, [put(3, 100.0), got(0, 20.0), got(1, 30.0)]);
        assert_eq!(s.level(), 50.0);
        assert_eq!(s.pending_gets(), 1);
    }

    #[test]
    fn blocked_put_waits_for_room() {
        let mut s = store(100.0, 90.0);
        assert!(s.put(ProcessId(0), 20.0).unwrap().is_empty());
        assert_eq!(s.level(), 90.0);
        assert_eq!(s.get(ProcessId(1), 15.0).unwrap(), [got(1, 15.0), put(0, 20.0)]);
        assert_eq!(s.level(), 95.0);
    }

    #[test]
    fn level_stays_in_bounds() {
        let mut s = store(50.0, 25.0);
        let amounts = [10.0, 40.0, 5.0, 50.0, 0.0, 25.0, 30.0];
        for (i, &a) in amounts.iter().enumerate() {
            if i % 2 == 0 {
                s.get(ProcessId(i as u64), a).unwrap();
            } else {
                s.put(ProcessId(i as u64), a).unwrap();
            }
            assert!((0.0..=s.capacity()).contains(&s.level()), "level {} out of range", s.level());
        }
    }
}

// ── Environment ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod env_tests {
    use super::*;

    #[test]
    fn timeouts_resume_at_target_instant() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("a", vec![
            Op::Wait(Condition::Timeout(5.0)),
            Op::Wait(Condition::Timeout(2.5)),
        ]));
        let summary = env.run(None, &mut NoopObserver).unwrap();

        assert_eq!(wakes(env.state(), "a", |w| *w == Wake::Timeout), [5.0, 7.5]);
        assert_eq!(summary.end_time, t(7.5));
        assert_eq!(summary.processes_alive, 0);
    }

    #[test]
    fn simultaneous_wakes_follow_scheduling_order() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        for name in ["first", "second", "third"] {
            env.spawn(Scripted::new(name, vec![Op::Wait(Condition::Timeout(3.0))]));
        }
        env.run(None, &mut NoopObserver).unwrap();

        let order: Vec<_> = env
            .state()
            .iter()
            .filter(|(_, _, w)| *w == Wake::Timeout)
            .map(|(_, n, _)| n.as_str())
            .collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn negative_timeout_aborts_run() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("bad", vec![Op::Wait(Condition::Timeout(-1.0))]));
        let err = env.run(None, &mut NoopObserver).unwrap_err();
        assert_eq!(err, EngineError::Des(DesError::InvalidDelay(-1.0)));
    }

    #[test]
    fn pump_requests_are_granted_fifo() {
        let mut builder = EnvironmentBuilder::new(Trace::new());
        let pump = builder.resource(1);
        let mut env = builder.build().unwrap();
        for name in ["a", "b", "c"] {
            env.spawn(Scripted::new(name, vec![
                Op::Wait(Condition::Request(pump)),
                Op::Wait(Condition::Timeout(5.0)),
                Op::Release(pump),
            ]));
        }
        env.run(None, &mut NoopObserver).unwrap();

        let granted = |n| wakes(env.state(), n, |w| matches!(w, Wake::Granted(_)));
        assert_eq!(granted("a"), [0.0]);
        assert_eq!(granted("b"), [5.0]);
        assert_eq!(granted("c"), [10.0]);
        assert_eq!(env.resource(pump).unwrap().granted(), 0);
    }

    #[test]
    fn slots_are_released_when_process_completes() {
        let mut builder = EnvironmentBuilder::new(Trace::new());
        let pump = builder.resource(1);
        let mut env = builder.build().unwrap();
        // "holder" never releases explicitly; exiting must free the slot.
        env.spawn(Scripted::new("holder", vec![
            Op::Wait(Condition::Request(pump)),
            Op::Wait(Condition::Timeout(4.0)),
        ]));
        env.spawn(Scripted::new("next", vec![Op::Wait(Condition::Request(pump))]));
        env.run(None, &mut NoopObserver).unwrap();

        assert_eq!(wakes(env.state(), "next", |w| matches!(w, Wake::Granted(_))), [4.0]);
        assert_eq!(env.resource(pump).unwrap().granted(), 0);
    }

    #[test]
    fn release_without_grant_aborts_run() {
        let mut builder = EnvironmentBuilder::new(Trace::new());
        let pump = builder.resource(1);
        let mut env = builder.build().unwrap();
        env.spawn(Scripted::new("rogue", vec![Op::Release(pump)]));
        let err = env.run(None, &mut NoopObserver).unwrap_err();
        assert!(matches!(err, EngineError::Des(DesError::ResourceMisuse { .. })));
    }

    #[test]
    fn unsatisfiable_get_only_kills_requester() {
        let mut builder = EnvironmentBuilder::new(Trace::new());
        let pump = builder.resource(1);
        let tank = builder.store(100.0, 100.0);
        let mut env = builder.build().unwrap();
        let greedy = env.spawn(Scripted::new("greedy", vec![
            Op::Wait(Condition::Request(pump)),
            Op::Wait(Condition::Get(tank, 101.0)),
        ]));
        env.spawn(Scripted::new("patient", vec![
            Op::Wait(Condition::Request(pump)),
            Op::Wait(Condition::Get(tank, 30.0)),
            Op::Release(pump),
        ]));
        let summary = env.run(None, &mut NoopObserver).unwrap();

        // greedy's slot is returned when it dies, so patient is served at t=0.
        assert_eq!(wakes(env.state(), "patient", |w| matches!(w, Wake::Granted(_))), [0.0]);
        assert_eq!(env.store(tank).unwrap().level(), 70.0);
        assert_eq!(summary.processes_failed, 1);

        let failure = &env.failures()[0];
        assert_eq!(failure.pid, greedy);
        assert_eq!(failure.name, "greedy");
        assert_eq!(
            failure.error,
            EngineError::Des(DesError::UnsatisfiableRequest {
                store:    tank,
                amount:   101.0,
                capacity: 100.0,
            })
        );
    }

    #[test]
    fn store_gets_block_head_of_line() {
        let mut builder = EnvironmentBuilder::new(Trace::new());
        let tank = builder.store(100.0, 10.0);
        let mut env = builder.build().unwrap();
        env.spawn(Scripted::new("big", vec![Op::Wait(Condition::Get(tank, 50.0))]));
        env.spawn(Scripted::new("small", vec![Op::Wait(Condition::Get(tank, 5.0))]));
        env.spawn(Scripted::new("refill", vec![
            Op::Wait(Condition::Timeout(3.0)),
            Op::Wait(Condition::Put(tank, 40.0)),
            Op::Wait(Condition::Timeout(2.0)),
            Op::Wait(Condition::Put(tank, 5.0)),
        ]));
        env.run(None, &mut NoopObserver).unwrap();

        let got = |n| wakes(env.state(), n, |w| matches!(w, Wake::Got { .. }));
        assert_eq!(got("big"), [3.0]);
        assert_eq!(got("small"), [5.0]);
        assert_eq!(env.store(tank).unwrap().level(), 0.0);
    }

    #[test]
    fn zero_amount_requests_complete_at_same_instant() {
        let mut builder = EnvironmentBuilder::new(Trace::new());
        let tank = builder.store(10.0, 4.0);
        let mut env = builder.build().unwrap();
        env.spawn(Scripted::new("z", vec![
            Op::Wait(Condition::Timeout(2.0)),
            Op::Wait(Condition::Get(tank, 0.0)),
            Op::Wait(Condition::Put(tank, 0.0)),
        ]));
        env.run(None, &mut NoopObserver).unwrap();

        let trace = env.state();
        assert_eq!(wakes(trace, "z", |w| matches!(w, Wake::Got { amount, .. } if *amount == 0.0)), [2.0]);
        assert_eq!(wakes(trace, "z", |w| matches!(w, Wake::Stored { amount, .. } if *amount == 0.0)), [2.0]);
        let store = env.store(tank).unwrap();
        assert_eq!(store.level(), 4.0);
        assert_eq!(store.pending_gets() + store.pending_puts(), 0);
    }

    #[test]
    fn join_waits_for_child() {
        struct Parent {
            child: Option<ProcessId>,
        }
        impl Process<Trace> for Parent {
            fn name(&self) -> &str {
                "parent"
            }
            fn resume(&mut self, wake: Wake, ctx: &mut Context<'_, Trace>) -> EngineResult<Step> {
                let now = ctx.now().as_secs();
                ctx.state_mut().push((now, "parent".into(), wake));
                match self.child {
                    None => {
                        let child = ctx.spawn(Scripted::new("child", vec![
                            Op::Wait(Condition::Timeout(7.0)),
                        ]));
                        self.child = Some(child);
                        Ok(Step::Wait(Condition::Join(child)))
                    }
                    Some(_) => Ok(Step::Done),
                }
            }
        }

        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Parent { child: None });
        env.run(None, &mut NoopObserver).unwrap();

        assert_eq!(wakes(env.state(), "parent", |w| matches!(w, Wake::Joined(_))), [7.0]);
    }

    #[test]
    fn join_on_finished_process_resumes_now() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        let quick = env.spawn(Scripted::new("quick", vec![]));
        env.spawn(Scripted::new("late", vec![
            Op::Wait(Condition::Timeout(1.0)),
            Op::Wait(Condition::Join(quick)),
        ]));
        env.run(None, &mut NoopObserver).unwrap();
        assert_eq!(wakes(env.state(), "late", |w| *w == Wake::Joined(quick)), [1.0]);
    }

    #[test]
    fn horizon_stops_before_events_at_horizon() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("a", vec![
            Op::Wait(Condition::Timeout(4.0)),
            Op::Wait(Condition::Timeout(6.0)),
        ]));
        let summary = env.run(Some(t(10.0)), &mut NoopObserver).unwrap();

        assert_eq!(wakes(env.state(), "a", |w| *w == Wake::Timeout), [4.0]);
        assert_eq!(summary.end_time, t(10.0));
        assert_eq!(summary.processes_alive, 1, "suspended process is abandoned");
        assert_eq!(env.pending_events(), 1);
    }

    #[test]
    fn callbacks_fire_and_can_be_cancelled() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.schedule_callback(2.0, |env| {
            let now = env.now().as_secs();
            env.state_mut().push((now, "kept".into(), Wake::Timeout));
            Ok(())
        })
        .unwrap();
        let dropped = env
            .schedule_callback(1.0, |env| {
                env.state_mut().push((0.0, "dropped".into(), Wake::Timeout));
                Ok(())
            })
            .unwrap();
        assert!(env.cancel(dropped));
        assert!(env.schedule_callback(-3.0, |_| Ok(())).is_err());

        env.run(None, &mut NoopObserver).unwrap();
        assert_eq!(env.state().len(), 1);
        assert_eq!(env.state()[0].1, "kept");
    }

    #[test]
    fn process_wakeups_cannot_be_cancelled() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("a", vec![]));
        assert!(!env.cancel(des_core::EventId(0)));
        assert_eq!(env.pending_events(), 1);
    }

    #[test]
    fn observer_sees_resumes_and_ends() {
        #[derive(Default)]
        struct Counter {
            resumes:   usize,
            completed: usize,
            ended_at:  Option<SimTime>,
        }
        impl SimObserver<Trace> for Counter {
            fn on_resume(&mut self, _now: SimTime, _pid: ProcessId, _wake: &Wake) {
                self.resumes += 1;
            }
            fn on_process_end(&mut self, _now: SimTime, _pid: ProcessId, _name: &str, outcome: &ProcessOutcome) {
                if *outcome == ProcessOutcome::Completed {
                    self.completed += 1;
                }
            }
            fn on_sim_end(&mut self, now: SimTime, state: &Trace) {
                assert_eq!(state.len(), 4);
                self.ended_at = Some(now);
            }
        }

        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("a", vec![Op::Wait(Condition::Timeout(1.0))]));
        env.spawn(Scripted::new("b", vec![Op::Wait(Condition::Timeout(2.0))]));
        let mut obs = Counter::default();
        env.run(Some(t(50.0)), &mut obs).unwrap();

        assert_eq!(obs.resumes, 4);
        assert_eq!(obs.completed, 2);
        assert_eq!(obs.ended_at, Some(t(50.0)));
    }

    #[test]
    fn step_dispatches_one_event() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("a", vec![Op::Wait(Condition::Timeout(1.0))]));
        assert!(env.step(&mut NoopObserver).unwrap());
        assert_eq!(env.state().len(), 1);
        assert!(env.step(&mut NoopObserver).unwrap());
        assert_eq!(env.now(), t(1.0));
        assert!(!env.step(&mut NoopObserver).unwrap());
    }

    #[test]
    fn independent_environments_do_not_share_clocks() {
        let mut a = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        let mut b = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        a.spawn(Scripted::new("a", vec![Op::Wait(Condition::Timeout(9.0))]));
        a.run(None, &mut NoopObserver).unwrap();
        assert_eq!(a.now(), t(9.0));
        assert_eq!(b.now(), SimTime::ZERO);
        b.run(None, &mut NoopObserver).unwrap();
        assert_eq!(b.now(), SimTime::ZERO);
    }

    #[test]
    fn unknown_ids_are_fatal() {
        let mut env = EnvironmentBuilder::new(Trace::new()).build().unwrap();
        env.spawn(Scripted::new("lost", vec![Op::Wait(Condition::Request(ResourceId(3)))]));
        let err = env.run(None, &mut NoopObserver).unwrap_err();
        assert_eq!(err, EngineError::Des(DesError::UnknownResource(ResourceId(3))));
    }
}

// ── EnvironmentBuilder ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut b = EnvironmentBuilder::new(());
        assert_eq!(b.resource(2), ResourceId(0));
        assert_eq!(b.resource(1), ResourceId(1));
        assert_eq!(b.store(10.0, 5.0), StoreId(0));
        let env = b.build().unwrap();
        assert_eq!(env.resource(ResourceId(1)).unwrap().capacity(), 1);
        assert_eq!(env.store(StoreId(0)).unwrap().level(), 5.0);
    }

    #[test]
    fn zero_capacity_resource_rejected() {
        let mut b = EnvironmentBuilder::new(());
        b.resource(0);
        assert!(matches!(b.build(), Err(EngineError::Config(_))));
    }

    #[test]
    fn store_parameters_validated() {
        for (capacity, initial) in [(0.0, 0.0), (-5.0, 0.0), (10.0, 11.0), (10.0, -1.0), (f64::NAN, 1.0)] {
            let mut b = EnvironmentBuilder::new(());
            b.store(capacity, initial);
            assert!(b.build().is_err(), "({capacity}, {initial}) should be rejected");
        }
    }
}
