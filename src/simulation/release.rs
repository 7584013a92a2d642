//! Release (consumer) path of the queue processor
//!
//! A released car leaves its slot immediately and moves to the exiting
//! set; the slot can be reused as soon as the call returns. In
//! synchronized mode the gate protocol is then logged as
//! `wait(full)`, `wait(mutex)`, `signal(mutex)`, `signal(empty)`.

use log::debug;

use super::semaphore::{SemaphoreKind, Semaphores};
use super::state::SimulationState;
use super::types::{CarId, SimTime};

/// Release the car parked in `slot_index`.
/// Returns the id of the car now exiting, or `None` if the slot is empty.
pub fn release_slot(
    state: &mut SimulationState,
    slot_index: usize,
    now: SimTime,
) -> Option<CarId> {
    let position = state
        .parked
        .iter()
        .position(|car| car.slot_index == Some(slot_index))?;

    let mut car = state.parked.remove(position);
    let car_id = car.id;
    car.exit();
    state.exiting.push(car);
    state.stats.record_exit();

    if !state.chaos_mode {
        let capacity = state.capacity;
        let semaphores = &mut state.semaphores;
        let events = &mut state.events;
        semaphores.wait(SemaphoreKind::Full, car_id, events, now);
        semaphores.wait(SemaphoreKind::Mutex, car_id, events, now);
        semaphores.signal(SemaphoreKind::Mutex, capacity, car_id, events, now);
        semaphores.signal(SemaphoreKind::Empty, capacity, car_id, events, now);

        // Still more cars than slots after a capacity shrink
        if state.parked.len() >= capacity {
            state.semaphores = Semaphores::from_occupancy(capacity, state.parked.len());
        }
    }

    debug!("{} left slot {}", car_id, slot_index);
    Some(car_id)
}

/// Release whichever parked car was admitted first
pub fn release_oldest(state: &mut SimulationState, now: SimTime) -> Option<CarId> {
    let slot_index = state.parked.first()?.slot_index?;
    release_slot(state, slot_index, now)
}

/// Drop an exiting car for good once its exit delay has elapsed
pub fn finish_exit(state: &mut SimulationState, car_id: CarId) -> bool {
    let before = state.exiting.len();
    state.exiting.retain(|car| car.id != car_id);
    if state.exiting.len() == before {
        return false;
    }
    state.deselect(car_id);
    true
}

/// Take a car out of the waiting queue without it ever parking
pub fn remove_from_queue(state: &mut SimulationState, car_id: CarId) -> bool {
    let before = state.waiting.len();
    state.waiting.retain(|car| car.id != car_id);
    if state.waiting.len() == before {
        return false;
    }
    state.deselect(car_id);
    true
}
