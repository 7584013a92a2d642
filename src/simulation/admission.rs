//! Admission (producer) path of the queue processor
//!
//! Each call looks at the head of the waiting queue only. There are two
//! variants: the synchronized one goes through the semaphores, the chaos
//! one bypasses them and relies on a slot scan alone.
//!
//! Both variants mutate a working copy handed in by the reducer, which
//! publishes it as a single new snapshot.

use log::debug;

use super::event_log::OperationKind;
use super::semaphore::SemaphoreKind;
use super::state::SimulationState;
use super::types::{CarId, SimTime};

/// What one admission attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Nobody is waiting
    Idle,
    /// The head car took a slot
    Parked { car_id: CarId, slot_index: usize },
    /// The head car was refused and has just been marked blocked
    Blocked {
        car_id: CarId,
        semaphore: Option<SemaphoreKind>,
    },
    /// The head car was refused again; nothing changed
    StillBlocked { car_id: CarId },
}

/// Synchronized admission:
/// `wait(empty)`, `wait(mutex)`, take the lowest free slot,
/// `signal(mutex)`, `signal(full)`.
pub fn admit_synchronized(state: &mut SimulationState, now: SimTime) -> AdmissionOutcome {
    let (car_id, already_blocked) = match state.head() {
        Some(car) => (car.id, car.is_blocked()),
        None => return AdmissionOutcome::Idle,
    };

    // Consistent counters imply a free slot below capacity whenever `empty > 0`
    let free_slot = state
        .lowest_free_slot()
        .filter(|_| state.semaphores.empty > 0);
    let Some(slot_index) = free_slot else {
        if already_blocked {
            return AdmissionOutcome::StillBlocked { car_id };
        }
        // Logged as a blocked wait(empty); the counter is untouched
        state
            .events
            .record(OperationKind::Wait, SemaphoreKind::Empty, car_id, true, now);
        block_head(state);
        state.stats.record_blocking();
        debug!("{} blocked on wait(empty)", car_id);
        return AdmissionOutcome::Blocked {
            car_id,
            semaphore: Some(SemaphoreKind::Empty),
        };
    };

    let capacity = state.capacity;
    let semaphores = &mut state.semaphores;
    let events = &mut state.events;
    semaphores.wait(SemaphoreKind::Empty, car_id, events, now);
    semaphores.wait(SemaphoreKind::Mutex, car_id, events, now);
    semaphores.signal(SemaphoreKind::Mutex, capacity, car_id, events, now);
    semaphores.signal(SemaphoreKind::Full, capacity, car_id, events, now);

    park_head(state, slot_index, now);
    debug!("{} parked in slot {}", car_id, slot_index);
    AdmissionOutcome::Parked {
        car_id,
        slot_index,
    }
}

/// Unsynchronized admission: no counters are read or written and nothing
/// is logged. The head car takes the lowest slot the scan finds free, or is
/// left blocked at the head of the queue.
pub fn admit_chaos(state: &mut SimulationState, now: SimTime) -> AdmissionOutcome {
    let (car_id, already_blocked) = match state.head() {
        Some(car) => (car.id, car.is_blocked()),
        None => return AdmissionOutcome::Idle,
    };

    match state.lowest_free_slot() {
        Some(slot_index) => {
            park_head(state, slot_index, now);
            debug!("{} parked in slot {} without synchronization", car_id, slot_index);
            AdmissionOutcome::Parked {
                car_id,
                slot_index,
            }
        }
        None if already_blocked => AdmissionOutcome::StillBlocked { car_id },
        None => {
            block_head(state);
            state.stats.record_collision();
            debug!("{} collided: no free slot found by scan", car_id);
            AdmissionOutcome::Blocked {
                car_id,
                semaphore: None,
            }
        }
    }
}

fn block_head(state: &mut SimulationState) {
    if let Some(head) = state.waiting.front_mut() {
        head.block();
    }
}

fn park_head(state: &mut SimulationState, slot_index: usize, now: SimTime) {
    if let Some(mut car) = state.waiting.pop_front() {
        let waited = now.saturating_sub(car.arrived_at);
        car.park(slot_index);
        state.parked.push(car);
        let occupancy = state.parked.len();
        state.stats.record_parked(waited, occupancy);
    }
}
