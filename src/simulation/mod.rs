//! Parking lot producer/consumer simulation
//!
//! This module contains the whole simulation engine. It runs headless:
//! a presentation layer reads [`SimulationState`] snapshots and sends
//! commands through [`Engine`].

mod admission;
mod car;
mod command;
mod config;
mod engine;
mod event_log;
mod release;
mod scheduler;
mod semaphore;
mod state;
mod stats;
mod types;

// Re-export public types for external use
pub use admission::{admit_chaos, admit_synchronized, AdmissionOutcome};
pub use car::{Car, CarSpec, CarState, CAR_COLORS, CAR_MODELS};
pub use command::{reduce, Command, Effect, Notification, NotificationLevel, Transition};
pub use config::{clamp_capacity, clamp_speed, EngineConfig};
pub use engine::Engine;
pub use event_log::{EventLog, OperationKind, SimulationEvent};
pub use release::{finish_exit, release_oldest, release_slot, remove_from_queue};
pub use scheduler::{Scheduler, TimerConcern};
pub use semaphore::{SemaphoreKind, Semaphores, WaitOutcome};
pub use state::SimulationState;
pub use stats::SimulationStats;
pub use types::{
    scaled_interval, CarId, EventId, SimId, SimTime, AUTO_SPAWN_SOFT_CAP,
    BASE_ADMISSION_INTERVAL_MS, BASE_ARRIVAL_INTERVAL_MS, DEFAULT_CAPACITY, DEFAULT_SPEED,
    EVENT_LOG_LIMIT, EXIT_DELAY_MS, MAX_CAPACITY, MAX_SPEED, MIN_CAPACITY, MIN_SPEED,
};
