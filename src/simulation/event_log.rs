//! Bounded log of semaphore operations
//!
//! Newest entries sit at the front. Once the log holds
//! [`EVENT_LOG_LIMIT`] entries the oldest one is dropped on every append.

use std::collections::VecDeque;
use std::fmt;

use super::semaphore::SemaphoreKind;
use super::types::{CarId, EventId, SimId, SimTime, EVENT_LOG_LIMIT};

/// Which half of the semaphore contract was exercised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Wait,
    Signal,
}

/// One wait or signal performed on behalf of a car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationEvent {
    pub id: EventId,
    pub timestamp: SimTime,
    pub operation: OperationKind,
    pub semaphore: SemaphoreKind,
    pub car_id: CarId,
    /// The wait found the counter at zero and the car did not proceed
    pub blocked: bool,
}

impl fmt::Display for SimulationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.operation {
            OperationKind::Wait => "wait",
            OperationKind::Signal => "signal",
        };
        write!(
            f,
            "[{:>7}ms] {}({}) by {}",
            self.timestamp,
            op,
            self.semaphore.label(),
            self.car_id
        )?;
        if self.blocked {
            write!(f, " BLOCKED")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: VecDeque<SimulationEvent>,
    next_id: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        operation: OperationKind,
        semaphore: SemaphoreKind,
        car_id: CarId,
        blocked: bool,
        timestamp: SimTime,
    ) {
        let id = EventId(SimId(self.next_id));
        self.next_id += 1;

        self.events.push_front(SimulationEvent {
            id,
            timestamp,
            operation,
            semaphore,
            car_id,
            blocked,
        });
        self.events.truncate(EVENT_LOG_LIMIT);
    }

    /// Drop every entry. Ids keep counting so entries from before a reset
    /// are never confused with new ones.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &SimulationEvent> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&SimulationEvent> {
        self.events.front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
