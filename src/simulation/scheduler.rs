//! Virtual-time scheduler
//!
//! Owns the simulation clock and one cancellable timer per concern.
//! Scheduling a concern that already has a pending timer replaces it, so
//! timers never stack.

use sorted_vec::SortedVec;

use super::types::{CarId, SimTime};

/// What a timer is for. At most one pending timer exists per concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerConcern {
    /// Periodic admission attempt while running
    Admission,
    /// Periodic auto-spawn arrival
    Arrival,
    /// One-shot removal of an exiting car
    Exit(CarId),
}

/// Ordered by deadline, then by scheduling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingTimer {
    deadline: SimTime,
    seq: u64,
    concern: TimerConcern,
    period: Option<SimTime>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: SimTime,
    next_seq: u64,
    timers: SortedVec<PendingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Arm `concern` to fire `delay` ms from now, then every `period` ms if given.
    /// Any pending timer for the same concern is dropped first.
    pub fn schedule(&mut self, concern: TimerConcern, delay: SimTime, period: Option<SimTime>) {
        self.cancel(concern);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(PendingTimer {
            deadline: self.now + delay,
            seq,
            concern,
            period,
        });
    }

    /// Returns true if a timer was pending
    pub fn cancel(&mut self, concern: TimerConcern) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.concern != concern);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers = SortedVec::new();
    }

    pub fn is_scheduled(&self, concern: TimerConcern) -> bool {
        self.timers.iter().any(|timer| timer.concern == concern)
    }

    /// Period of the pending timer for `concern`, if it repeats
    pub fn period_of(&self, concern: TimerConcern) -> Option<SimTime> {
        self.timers
            .iter()
            .find(|timer| timer.concern == concern)
            .and_then(|timer| timer.period)
    }

    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<SimTime> {
        self.timers.first().map(|timer| timer.deadline)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Periodic timers are re-armed for their next deadline.
    pub fn pop_due(&mut self, until: SimTime) -> Option<TimerConcern> {
        match self.timers.first() {
            Some(timer) if timer.deadline <= until => {}
            _ => return None,
        }

        let timer = self.timers.remove_index(0);
        self.now = self.now.max(timer.deadline);

        if let Some(period) = timer.period {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.timers.insert(PendingTimer {
                deadline: timer.deadline + period,
                seq,
                ..timer
            });
        }

        Some(timer.concern)
    }

    /// Move the clock forward without firing anything.
    /// The clock never runs backwards.
    pub fn advance_to(&mut self, time: SimTime) {
        self.now = self.now.max(time);
    }
}
