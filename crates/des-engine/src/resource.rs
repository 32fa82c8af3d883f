//! `CountedResource` — a pool of identical, exclusively held slots.
//!
//! Pure bookkeeping: the resource records who holds a slot and who is
//! waiting, and tells the caller whom to wake.  Scheduling the wake-up is the
//! environment's job.

use std::collections::VecDeque;

use des_core::{DesError, DesResult, ProcessId, ResourceId};

/// A fixed number of interchangeable slots with a FIFO wait queue.
///
/// Invariants:
/// - `granted() <= capacity()` at all times;
/// - a requester is queued only while every slot is held;
/// - slots are handed out in strict request order.
#[derive(Debug, Clone)]
pub struct CountedResource {
    id:       ResourceId,
    capacity: usize,
    /// Current slot holders.  A process may hold more than one slot.
    holders:  Vec<ProcessId>,
    waiting:  VecDeque<ProcessId>,
}

impl CountedResource {
    /// # Panics
    /// Panics if `capacity == 0`; the builder validates this first.
    pub fn new(id: ResourceId, capacity: usize) -> Self {
        assert!(capacity > 0, "counted resource needs at least one slot");
        Self {
            id,
            capacity,
            holders: Vec::with_capacity(capacity),
            waiting: VecDeque::new(),
        }
    }

    /// Ask for a slot.  Returns `true` if granted on the spot, `false` if the
    /// requester was queued.  Never rejects.
    pub fn request(&mut self, who: ProcessId) -> bool {
        if self.holders.len() < self.capacity && self.waiting.is_empty() {
            self.holders.push(who);
            true
        } else {
            self.waiting.push_back(who);
            false
        }
    }

    /// Return one of `who`'s slots.  If someone is waiting, the freed slot
    /// goes to the queue head, which is returned so the caller can wake it.
    ///
    /// Fails with [`DesError::ResourceMisuse`] if `who` holds no slot.
    pub fn release(&mut self, who: ProcessId) -> DesResult<Option<ProcessId>> {
        let Some(pos) = self.holders.iter().position(|&p| p == who) else {
            return Err(DesError::ResourceMisuse { resource: self.id, process: who });
        };
        self.holders.swap_remove(pos);

        let next = self.waiting.pop_front();
        if let Some(next) = next {
            self.holders.push(next);
        }
        Ok(next)
    }

    /// Number of slots `who` currently holds.
    pub fn held_by(&self, who: ProcessId) -> usize {
        self.holders.iter().filter(|&&p| p == who).count()
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held.
    pub fn granted(&self) -> usize {
        self.holders.len()
    }

    /// Number of blocked requesters.
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// Blocked requesters in grant order.
    pub fn waiting(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.waiting.iter().copied()
    }
}
