//! Engine configuration
//!
//! Out-of-range values are clamped rather than rejected, the same policy
//! the capacity and speed commands follow at runtime.

use super::types::{
    DEFAULT_CAPACITY, DEFAULT_SPEED, MAX_CAPACITY, MAX_SPEED, MIN_CAPACITY, MIN_SPEED,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    capacity: usize,
    speed: f64,
    /// Start with synchronization disabled
    pub chaos_mode: bool,
    /// Start in manual single-step mode
    pub step_mode: bool,
    /// Start with the arrival timer enabled
    pub auto_spawn: bool,
    /// Seed for reproducible colors and names
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            speed: DEFAULT_SPEED,
            chaos_mode: false,
            step_mode: false,
            auto_spawn: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = clamp_capacity(capacity);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        if let Some(speed) = clamp_speed(speed) {
            self.speed = speed;
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

/// Clamp a requested lot size to `[MIN_CAPACITY, MAX_CAPACITY]`
pub fn clamp_capacity(requested: i64) -> usize {
    requested.clamp(MIN_CAPACITY as i64, MAX_CAPACITY as i64) as usize
}

/// Clamp a speed multiplier to `[MIN_SPEED, MAX_SPEED]`. NaN is ignored.
pub fn clamp_speed(requested: f64) -> Option<f64> {
    if requested.is_nan() {
        return None;
    }
    Some(requested.clamp(MIN_SPEED, MAX_SPEED))
}
