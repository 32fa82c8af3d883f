//! `QuantityStore` — a bounded, depletable and refillable quantity.
//!
//! # Serving order
//!
//! Gets and puts wait in two separate FIFO queues.  Whenever the level
//! changes, [`settle`][QuantityStore::settle] serves each queue from the
//! head while the head fits, alternating until neither queue moves.  A
//! request never overtakes an earlier one in its own queue, even if it would
//! fit (head-of-line blocking).
//!
//! A new request is simply appended and the store settled, so an empty queue
//! plus enough level means "served immediately", and a non-empty queue means
//! "wait your turn".

use std::collections::VecDeque;

use des_core::{DesError, DesResult, ProcessId, StoreId};

/// Slack used when comparing levels so that integer-valued amounts summed in
/// `f64` never spuriously overflow or underflow.
pub const EPSILON: f64 = 1e-9;

/// Which side of the store a request was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Get,
    Put,
}

/// A request that has just been served and whose owner must be woken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Served {
    pub process: ProcessId,
    pub op:      StoreOp,
    pub amount:  f64,
}

#[derive(Debug, Clone)]
pub struct QuantityStore {
    id:       StoreId,
    capacity: f64,
    level:    f64,
    gets:     VecDeque<(ProcessId, f64)>,
    puts:     VecDeque<(ProcessId, f64)>,
}

impl QuantityStore {
    /// # Panics
    /// Panics unless `0 < capacity` and `0 <= initial <= capacity`; the
    /// builder validates this first.
    pub fn new(id: StoreId, capacity: f64, initial: f64) -> Self {
        assert!(capacity.is_finite() && capacity > 0.0, "store capacity must be positive");
        assert!((0.0..=capacity).contains(&initial), "initial level out of range");
        Self {
            id,
            capacity,
            level: initial,
            gets:  VecDeque::new(),
            puts:  VecDeque::new(),
        }
    }

    /// Request `amount` out of the store on behalf of `who`.
    ///
    /// Returns every request served as a consequence, in serving order; it
    /// contains `who` if the get was satisfied on the spot.
    ///
    /// # Errors
    /// - [`DesError::InvalidAmount`] for negative or non-finite amounts;
    /// - [`DesError::UnsatisfiableRequest`] if `amount > capacity`.
    pub fn get(&mut self, who: ProcessId, amount: f64) -> DesResult<Vec<Served>> {
        self.check(amount)?;
        if amount == 0.0 {
            return Ok(vec![Served { process: who, op: StoreOp::Get, amount }]);
        }
        self.gets.push_back((who, amount));
        Ok(self.settle())
    }

    /// Offer `amount` into the store on behalf of `who`.
    ///
    /// Same return value and errors as [`get`][Self::get].
    pub fn put(&mut self, who: ProcessId, amount: f64) -> DesResult<Vec<Served>> {
        self.check(amount)?;
        if amount == 0.0 {
            return Ok(vec![Served { process: who, op: StoreOp::Put, amount }]);
        }
        self.puts.push_back((who, amount));
        Ok(self.settle())
    }

    fn check(&self, amount: f64) -> DesResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DesError::InvalidAmount(amount));
        }
        if amount > self.capacity + EPSILON {
            return Err(DesError::UnsatisfiableRequest {
                store:    self.id,
                amount,
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Serve queued requests from the head of each queue until neither can
    /// make progress.
    pub fn settle(&mut self) -> Vec<Served> {
        let mut served = Vec::new();
        loop {
            let mut progressed = false;

            while let Some(&(process, amount)) = self.gets.front() {
                if amount > self.level + EPSILON {
                    break;
                }
                self.gets.pop_front();
                self.level = (self.level - amount).max(0.0);
                served.push(Served { process, op: StoreOp::Get, amount });
                progressed = true;
            }

            while let Some(&(process, amount)) = self.puts.front() {
                if self.level + amount > self.capacity + EPSILON {
                    break;
                }
                self.puts.pop_front();
                self.level = (self.level + amount).min(self.capacity);
                served.push(Served { process, op: StoreOp::Put, amount });
                progressed = true;
            }

            if !progressed {
                return served;
            }
        }
    }

    pub fn id(&self) -> StoreId {
        self.id
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Room left before the store is full.
    pub fn headroom(&self) -> f64 {
        self.capacity - self.level
    }

    /// Level as a percentage of capacity.
    pub fn fill_pct(&self) -> f64 {
        self.level / self.capacity * 100.0
    }

    pub fn pending_gets(&self) -> usize {
        self.gets.len()
    }

    pub fn pending_puts(&self) -> usize {
        self.puts.len()
    }
}
