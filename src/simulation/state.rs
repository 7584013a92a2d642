//! Authoritative snapshot of the parking simulation
//!
//! Commands never edit a snapshot in place from the outside: the reducer
//! clones it, applies a whole command, and publishes the result as the
//! next version.

use std::collections::VecDeque;

use ordered_float::OrderedFloat;

use super::car::{Car, CarSpec};
use super::config::EngineConfig;
use super::event_log::EventLog;
use super::semaphore::Semaphores;
use super::stats::SimulationStats;
use super::types::{CarId, SimId, SimTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    /// Bumped every time a command changes the snapshot
    pub version: u64,

    /// FIFO queue; index 0 is the next admission candidate
    pub waiting: VecDeque<Car>,

    /// Parked cars in admission order. Looked up by slot.
    pub parked: Vec<Car>,

    /// Cars whose exit delay is still running
    pub exiting: Vec<Car>,

    pub semaphores: Semaphores,
    pub events: EventLog,
    pub stats: SimulationStats,

    pub capacity: usize,
    pub is_running: bool,
    pub speed: OrderedFloat<f64>,
    pub chaos_mode: bool,
    pub step_mode: bool,
    pub auto_spawn: bool,

    pub selected: Option<CarId>,

    next_car_id: usize,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SimulationState {
    pub fn new(config: &EngineConfig) -> Self {
        let capacity = config.capacity();
        Self {
            version: 0,
            waiting: VecDeque::new(),
            parked: Vec::new(),
            exiting: Vec::new(),
            semaphores: Semaphores::new(capacity),
            events: EventLog::new(),
            stats: SimulationStats::new(),
            capacity,
            is_running: false,
            speed: OrderedFloat(config.speed()),
            chaos_mode: config.chaos_mode,
            step_mode: config.step_mode,
            auto_spawn: config.auto_spawn,
            selected: None,
            next_car_id: 0,
        }
    }

    /// Create a car and append it to the tail of the queue.
    /// Arrival never checks capacity.
    pub fn enqueue(&mut self, spec: CarSpec, now: SimTime) -> CarId {
        let id = CarId(SimId(self.next_car_id));
        self.next_car_id += 1;
        self.waiting.push_back(Car::new(id, spec, now));
        self.stats.record_arrival();
        id
    }

    /// Id the next enqueued car will get
    pub fn next_car_id(&self) -> CarId {
        CarId(SimId(self.next_car_id))
    }

    pub fn head(&self) -> Option<&Car> {
        self.waiting.front()
    }

    pub fn parked_in_slot(&self, slot_index: usize) -> Option<&Car> {
        self.parked
            .iter()
            .find(|car| car.slot_index == Some(slot_index))
    }

    /// Lowest slot in `[0, capacity)` no parked car occupies
    pub fn lowest_free_slot(&self) -> Option<usize> {
        (0..self.capacity).find(|slot| self.parked_in_slot(*slot).is_none())
    }

    /// Search every collection for a car
    pub fn find_car(&self, car_id: CarId) -> Option<&Car> {
        self.waiting
            .iter()
            .chain(self.parked.iter())
            .chain(self.exiting.iter())
            .find(|car| car.id == car_id)
    }

    pub fn selected_car(&self) -> Option<&Car> {
        self.selected.and_then(|id| self.find_car(id))
    }

    /// Forget the selection if it points at `car_id`
    pub fn deselect(&mut self, car_id: CarId) {
        if self.selected == Some(car_id) {
            self.selected = None;
        }
    }

    /// Counter invariant of the synchronized mode
    pub fn is_consistent(&self) -> bool {
        self.semaphores
            .is_consistent(self.capacity, self.parked.len())
    }
}
