//! `EventQueue` — time-ordered queue of pending wake-ups, plus the clock.
//!
//! # Layout
//!
//! Events are bucketed by trigger instant in a `BTreeMap<SimTime,
//! VecDeque<..>>`.  Within a bucket, entries keep insertion order, so popping
//! the front of the earliest bucket yields the earliest event with FIFO
//! tiebreaking for equal instants.  That ordering is what makes runs
//! reproducible for a fixed seed.
//!
//! # Cancellation
//!
//! A side index `EventId → SimTime` locates an event's bucket in O(log W)
//! (W = number of distinct pending instants); removal within the bucket is a
//! linear scan, which is cheap because buckets hold a handful of entries.

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashMap;

use des_core::{Clock, DesError, DesResult, EventId, SimTime};

/// A priority queue mapping instants → payloads scheduled at that instant.
pub struct EventQueue<T> {
    inner: BTreeMap<SimTime, VecDeque<(EventId, T)>>,
    /// Pending event → its bucket.  Entries leave on pop or cancel.
    index: FxHashMap<EventId, SimTime>,
    clock: Clock,
    next_id: u64,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self {
            inner:   BTreeMap::new(),
            index:   FxHashMap::default(),
            clock:   Clock::new(),
            next_id: 0,
        }
    }
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current simulated instant.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Enqueue `payload` to fire `delay` seconds from now.
    ///
    /// Fails with [`DesError::InvalidDelay`] for negative or non-finite
    /// delays, leaving the queue untouched.
    pub fn schedule(&mut self, delay: f64, payload: T) -> DesResult<EventId> {
        let time = self.now().offset(delay)?;
        Ok(self.push(time, payload))
    }

    /// Enqueue `payload` at the absolute instant `time`.
    ///
    /// Fails with [`DesError::InvalidDelay`] if `time` is in the past.
    pub fn schedule_at(&mut self, time: SimTime, payload: T) -> DesResult<EventId> {
        if time < self.now() {
            return Err(DesError::InvalidDelay(time.since(self.now())));
        }
        Ok(self.push(time, payload))
    }

    /// Enqueue `payload` at the current instant, behind everything already
    /// scheduled for now.
    pub fn schedule_now(&mut self, payload: T) -> EventId {
        let now = self.now();
        self.push(now, payload)
    }

    fn push(&mut self, time: SimTime, payload: T) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.inner.entry(time).or_default().push_back((id, payload));
        self.index.insert(id, time);
        id
    }

    /// Remove and return the earliest event, advancing the clock to its
    /// instant.  Returns `None` (clock untouched) when empty.
    pub fn pop(&mut self) -> Option<(SimTime, EventId, T)> {
        let mut bucket = self.inner.first_entry()?;
        let time = *bucket.key();
        let (id, payload) = bucket.get_mut().pop_front()?;
        if bucket.get().is_empty() {
            bucket.remove();
        }
        self.index.remove(&id);
        self.clock.advance_to(time);
        Some((time, id, payload))
    }

    /// Cancel a pending event.  Returns `false` if it already fired, was
    /// already cancelled, or never existed.
    pub fn cancel(&mut self, id: EventId) -> bool {
        let Some(time) = self.index.remove(&id) else {
            return false;
        };
        let Some(bucket) = self.inner.get_mut(&time) else {
            return false;
        };
        let removed = match bucket.iter().position(|(eid, _)| *eid == id) {
            Some(pos) => bucket.remove(pos).is_some(),
            None => false,
        };
        if bucket.is_empty() {
            self.inner.remove(&time);
        }
        removed
    }

    /// Move the clock forward to `time` without firing anything.  Used to
    /// park the clock at the run horizon.  Earlier instants are ignored.
    pub fn advance_to(&mut self, time: SimTime) {
        if time > self.now() {
            self.clock.advance_to(time);
        }
    }

    /// The earliest pending instant, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// `true` if `id` is still pending.
    pub fn is_pending(&self, id: EventId) -> bool {
        self.index.contains_key(&id)
    }

    /// Total number of pending events.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of distinct future instants with at least one pending event.
    pub fn instant_count(&self) -> usize {
        self.inner.len()
    }
}

impl<T> std::fmt::Display for EventQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventQueue with {} pending events at {}", self.len(), self.now())
    }
}
