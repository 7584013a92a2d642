//! Core types for the parking simulation
//!
//! Identifiers, the virtual clock unit and the tuning constants shared by
//! every part of the engine.

use std::fmt;

/// Virtual time in milliseconds, owned by the scheduler
pub type SimTime = u64;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub SimId);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "car-{}", self.0 .0)
    }
}

/// A wrapper type for event log entry IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub SimId);

/// Time a car spends in the exiting set before it is removed (not scaled by speed)
pub const EXIT_DELAY_MS: SimTime = 800;

/// Admission timer period at speed 1.0
pub const BASE_ADMISSION_INTERVAL_MS: f64 = 2000.0;

/// Auto-spawn timer period at speed 1.0
pub const BASE_ARRIVAL_INTERVAL_MS: f64 = 3000.0;

/// Number of events retained by the event log
pub const EVENT_LOG_LIMIT: usize = 50;

/// Auto-spawn stops adding cars once the waiting queue reaches this length
pub const AUTO_SPAWN_SOFT_CAP: usize = 8;

pub const MIN_CAPACITY: usize = 1;
pub const MAX_CAPACITY: usize = 10;
pub const DEFAULT_CAPACITY: usize = 5;

pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 3.0;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Convert a base period into a timer period for the given speed multiplier
pub fn scaled_interval(base_ms: f64, speed: f64) -> SimTime {
    ((base_ms / speed).round() as SimTime).max(1)
}
