//! Semaphore model guarding the parking gate
//!
//! Three counters: `mutex` (binary, exclusive gate passage), `empty`
//! (free slots) and `full` (occupied slots). Every wait and signal is
//! written to the event log. A wait on a zero counter never goes negative;
//! it is logged as blocked and the caller must not proceed.
//!
//! Chaos mode does not go through this model at all.

use super::event_log::{EventLog, OperationKind};
use super::types::{CarId, SimTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemaphoreKind {
    Mutex,
    Empty,
    Full,
}

impl SemaphoreKind {
    pub fn label(&self) -> &'static str {
        match self {
            SemaphoreKind::Mutex => "mutex",
            SemaphoreKind::Empty => "empty",
            SemaphoreKind::Full => "full",
        }
    }
}

/// Result of a wait operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Counter was positive and has been decremented
    Acquired,
    /// Counter was zero; nothing changed except the log
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semaphores {
    pub mutex: usize,
    pub empty: usize,
    pub full: usize,
}

impl Semaphores {
    /// Fresh counters for an empty lot
    pub fn new(capacity: usize) -> Self {
        Self {
            mutex: 1,
            empty: capacity,
            full: 0,
        }
    }

    /// Counters derived from how many cars are parked, clamped to `[0, capacity]`
    pub fn from_occupancy(capacity: usize, occupied: usize) -> Self {
        let full = occupied.min(capacity);
        Self {
            mutex: 1,
            empty: capacity - full,
            full,
        }
    }

    fn counter_mut(&mut self, kind: SemaphoreKind) -> &mut usize {
        match kind {
            SemaphoreKind::Mutex => &mut self.mutex,
            SemaphoreKind::Empty => &mut self.empty,
            SemaphoreKind::Full => &mut self.full,
        }
    }

    fn upper_bound(kind: SemaphoreKind, capacity: usize) -> usize {
        match kind {
            SemaphoreKind::Mutex => 1,
            SemaphoreKind::Empty | SemaphoreKind::Full => capacity,
        }
    }

    /// P operation
    pub fn wait(
        &mut self,
        kind: SemaphoreKind,
        car_id: CarId,
        log: &mut EventLog,
        now: SimTime,
    ) -> WaitOutcome {
        let counter = self.counter_mut(kind);
        if *counter == 0 {
            log.record(OperationKind::Wait, kind, car_id, true, now);
            return WaitOutcome::Blocked;
        }
        *counter -= 1;
        log.record(OperationKind::Wait, kind, car_id, false, now);
        WaitOutcome::Acquired
    }

    /// V operation. The counter saturates at its upper bound
    /// (1 for `mutex`, `capacity` for the others).
    pub fn signal(
        &mut self,
        kind: SemaphoreKind,
        capacity: usize,
        car_id: CarId,
        log: &mut EventLog,
        now: SimTime,
    ) {
        let limit = Self::upper_bound(kind, capacity);
        let counter = self.counter_mut(kind);
        *counter = (*counter + 1).min(limit);
        log.record(OperationKind::Signal, kind, car_id, false, now);
    }

    /// `empty + full == capacity` and `full == parked`
    pub fn is_consistent(&self, capacity: usize, parked: usize) -> bool {
        self.empty + self.full == capacity && self.full == parked
    }
}
