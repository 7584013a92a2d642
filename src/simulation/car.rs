//! Car lifecycle for the parking simulation
//!
//! A car is created `Waiting`, may flip to `Blocked` while it sits at the
//! head of the queue, becomes `Parked` with a slot, and finally `Exiting`
//! until the exit delay elapses.

use super::types::{CarId, SimTime};

/// Display colors handed out to new cars
pub const CAR_COLORS: [&str; 8] = [
    "#00d9ff", // cyan
    "#ff6b9d", // pink
    "#00ff88", // green
    "#ffb800", // amber
    "#ff4757", // red
    "#a55eea", // purple
    "#2ed573", // lime
    "#ff7f50", // coral
];

/// Model names used to build display names ("Sedan 3", "Coupe 7", ...)
pub const CAR_MODELS: [&str; 8] = [
    "Sedan",
    "Coupe",
    "Hatchback",
    "Wagon",
    "Roadster",
    "Pickup",
    "Van",
    "Convertible",
];

/// Where a car currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarState {
    /// In the waiting queue, not yet refused
    Waiting,
    /// At the head of the queue and refused admission on the last attempt
    Blocked,
    /// Occupying a slot
    Parked,
    /// Left its slot, waiting for the exit delay to elapse
    Exiting,
}

impl CarState {
    pub fn label(&self) -> &'static str {
        match self {
            CarState::Waiting => "waiting",
            CarState::Blocked => "blocked",
            CarState::Parked => "parked",
            CarState::Exiting => "exiting",
        }
    }
}

/// Display metadata for a car that is about to arrive.
/// The engine never interprets these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarSpec {
    pub color: &'static str,
    pub name: String,
}

/// A car in the parking simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub state: CarState,
    /// Present only while parked
    pub slot_index: Option<usize>,
    pub color: &'static str,
    pub name: String,
    /// Virtual time the car joined the queue
    pub arrived_at: SimTime,
}

impl Car {
    pub fn new(id: CarId, spec: CarSpec, arrived_at: SimTime) -> Self {
        Self {
            id,
            state: CarState::Waiting,
            slot_index: None,
            color: spec.color,
            name: spec.name,
            arrived_at,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.state == CarState::Blocked
    }

    /// Mark the car as refused admission.
    /// Returns false if it was already blocked.
    pub fn block(&mut self) -> bool {
        if self.is_blocked() {
            return false;
        }
        self.state = CarState::Blocked;
        true
    }

    /// Put a refused car back to plain waiting
    pub fn unblock(&mut self) {
        if self.is_blocked() {
            self.state = CarState::Waiting;
        }
    }

    /// Take a slot
    pub fn park(&mut self, slot_index: usize) {
        self.state = CarState::Parked;
        self.slot_index = Some(slot_index);
    }

    /// Leave the slot
    pub fn exit(&mut self) {
        self.state = CarState::Exiting;
        self.slot_index = None;
    }
}
