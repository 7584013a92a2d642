//! Running statistics for the parking simulation
//!
//! Tracks throughput and contention so a learner can compare a
//! synchronized run against a chaos run.

use super::types::SimTime;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Cars that joined the queue
    pub total_arrived: usize,

    /// Cars that were admitted to a slot
    pub total_parked: usize,

    /// Cars that were released from a slot
    pub total_exited: usize,

    /// Sum of queue time over every admitted car
    pub total_wait_time_ms: SimTime,
    pub cars_with_wait_time: usize,

    /// Head cars refused by `wait(empty)`
    pub blocking_events: usize,

    /// Most cars parked at the same time
    pub peak_occupancy: usize,

    /// Head cars that found no free slot while synchronization was off
    pub chaos_collisions: usize,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_arrival(&mut self) {
        self.total_arrived += 1;
    }

    /// Record an admission and the time the car spent queued
    pub fn record_parked(&mut self, waited_ms: SimTime, occupancy: usize) {
        self.total_parked += 1;
        self.total_wait_time_ms += waited_ms;
        self.cars_with_wait_time += 1;
        self.peak_occupancy = self.peak_occupancy.max(occupancy);
    }

    pub fn record_exit(&mut self) {
        self.total_exited += 1;
    }

    pub fn record_blocking(&mut self) {
        self.blocking_events += 1;
    }

    pub fn record_collision(&mut self) {
        self.chaos_collisions += 1;
    }

    /// Mean queue time of admitted cars in milliseconds
    pub fn average_wait_ms(&self) -> f64 {
        if self.cars_with_wait_time == 0 {
            return 0.0;
        }
        self.total_wait_time_ms as f64 / self.cars_with_wait_time as f64
    }

    /// Occupancy as a whole percentage
    pub fn occupancy_percent(parked: usize, capacity: usize) -> usize {
        if capacity == 0 {
            return 0;
        }
        ((parked as f64 / capacity as f64) * 100.0).round() as usize
    }

    pub fn summary(&self) -> String {
        format!(
            "Parked: {} | Exited: {} | Avg wait: {:.1}s | Blocking: {} | Peak: {} | Collisions: {}",
            self.total_parked,
            self.total_exited,
            self.average_wait_ms() / 1000.0,
            self.blocking_events,
            self.peak_occupancy,
            self.chaos_collisions
        )
    }
}
