//! Main simulation engine that ties everything together
//!
//! Owns the current snapshot, the scheduler and the RNG. Every public
//! command goes through [`reduce`] and the resulting effects are applied
//! here, so the snapshot is always replaced as a whole.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::car::{Car, CarSpec, CAR_COLORS, CAR_MODELS};
use super::command::{arrival_period, reduce, Command, Effect, Notification, NotificationLevel};
use super::config::EngineConfig;
use super::scheduler::{Scheduler, TimerConcern};
use super::state::SimulationState;
use super::stats::SimulationStats;
use super::types::{CarId, SimTime, AUTO_SPAWN_SOFT_CAP};

pub struct Engine {
    state: SimulationState,
    scheduler: Scheduler,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    /// Notifications not yet collected by the caller
    notifications: Vec<Notification>,

    /// Counts generated display names
    names_issued: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = config.seed.map(StdRng::seed_from_u64);
        let mut engine = Self {
            state: SimulationState::new(&config),
            scheduler: Scheduler::new(),
            rng,
            notifications: Vec::new(),
            names_issued: 0,
        };

        if let Some(period) = arrival_period(&engine.state) {
            engine
                .scheduler
                .schedule(TimerConcern::Arrival, period, Some(period));
        }
        engine
    }

    /// Create an engine with a seeded RNG for reproducible simulations
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::default().with_seed(seed))
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.state.stats
    }

    pub fn selected_car(&self) -> Option<&Car> {
        self.state.selected_car()
    }

    /// Drain the notifications raised since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Choose a random element from a slice, using seeded RNG if available
    fn choose_random<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        match &mut self.rng {
            Some(rng) => slice.choose(rng),
            None => slice.choose(&mut rand::rng()),
        }
    }

    fn next_car_spec(&mut self) -> CarSpec {
        self.names_issued += 1;
        let color = self.choose_random(&CAR_COLORS).copied().unwrap_or(CAR_COLORS[0]);
        let model = self.choose_random(&CAR_MODELS).copied().unwrap_or(CAR_MODELS[0]);
        CarSpec {
            color,
            name: format!("{} {}", model, self.names_issued),
        }
    }

    /// Reduce a command against the current snapshot and apply its effects
    pub fn dispatch(&mut self, command: Command) {
        let now = self.scheduler.now();
        let transition = reduce(&self.state, &command, now);

        if transition.state.version != self.state.version {
            debug!(
                "{:?} -> version {} at {}ms",
                command, transition.state.version, now
            );
        }
        self.state = transition.state;

        for effect in transition.effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Schedule {
                concern,
                delay,
                period,
            } => self.scheduler.schedule(concern, delay, period),
            Effect::Cancel(concern) => {
                self.scheduler.cancel(concern);
            }
            Effect::CancelAll => self.scheduler.cancel_all(),
            Effect::Notify(notification) => {
                match notification.level {
                    NotificationLevel::Warning => warn!("{}", notification.message),
                    NotificationLevel::Info | NotificationLevel::Success => {
                        info!("{}", notification.message)
                    }
                }
                self.notifications.push(notification);
            }
        }
    }

    /// Run the clock forward by `delta_ms`, firing due timers in deadline order
    pub fn advance(&mut self, delta_ms: SimTime) {
        let target = self.scheduler.now() + delta_ms;

        while let Some(concern) = self.scheduler.pop_due(target) {
            let command = match concern {
                TimerConcern::Admission => Command::AdmissionTick,
                TimerConcern::Arrival if self.accepts_arrival() => {
                    Command::AutoSpawn(self.next_car_spec())
                }
                TimerConcern::Arrival => continue,
                TimerConcern::Exit(car_id) => Command::FinishExit(car_id),
            };
            self.dispatch(command);
        }

        self.scheduler.advance_to(target);
    }

    /// Auto-spawn only draws a name when the queue is below its soft cap
    fn accepts_arrival(&self) -> bool {
        self.state.auto_spawn && self.state.waiting.len() < AUTO_SPAWN_SOFT_CAP
    }

    /// Add a car to the tail of the queue. Returns its id.
    pub fn add_car(&mut self) -> CarId {
        let spec = self.next_car_spec();
        let car_id = self.state.next_car_id();
        self.dispatch(Command::AddCar(spec));
        car_id
    }

    pub fn remove_oldest_parked(&mut self) {
        self.dispatch(Command::RemoveOldestParked);
    }

    pub fn remove_from_slot(&mut self, slot_index: usize) {
        self.dispatch(Command::RemoveFromSlot(slot_index));
    }

    pub fn remove_from_queue(&mut self, car_id: CarId) {
        self.dispatch(Command::RemoveFromQueue(car_id));
    }

    pub fn toggle_running(&mut self) {
        self.dispatch(Command::ToggleRunning);
    }

    pub fn reset(&mut self) {
        self.dispatch(Command::Reset);
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.dispatch(Command::SetSpeed(speed));
    }

    pub fn set_capacity(&mut self, capacity: i64) {
        self.dispatch(Command::SetCapacity(capacity));
    }

    pub fn toggle_chaos_mode(&mut self) {
        self.dispatch(Command::ToggleChaosMode);
    }

    pub fn toggle_step_mode(&mut self) {
        self.dispatch(Command::ToggleStepMode);
    }

    pub fn step(&mut self) {
        self.dispatch(Command::Step);
    }

    pub fn toggle_auto_spawn(&mut self) {
        self.dispatch(Command::ToggleAutoSpawn);
    }

    pub fn select_car(&mut self, car_id: Option<CarId>) {
        self.dispatch(Command::SelectCar(car_id));
    }

    /// Print a summary of the current simulation state
    pub fn print_summary(&self) {
        let state = &self.state;
        println!("=== Parking Simulation Summary ===");
        println!("Time: {:.2}s (version {})", self.now() as f64 / 1000.0, state.version);
        println!(
            "Mode: {}{}{}",
            if state.chaos_mode { "CHAOS" } else { "synchronized" },
            if state.step_mode { ", step" } else { "" },
            if state.auto_spawn { ", auto-spawn" } else { "" }
        );
        println!(
            "Semaphores: mutex={} empty={} full={} (capacity {})",
            state.semaphores.mutex, state.semaphores.empty, state.semaphores.full, state.capacity
        );
        println!(
            "Waiting: {}, Parked: {}, Exiting: {}, Occupancy: {}%",
            state.waiting.len(),
            state.parked.len(),
            state.exiting.len(),
            SimulationStats::occupancy_percent(state.parked.len(), state.capacity)
        );
        println!("{}", state.stats.summary());

        if !state.waiting.is_empty() {
            println!("--- Queue ---");
            for car in &state.waiting {
                println!("  {} {} ({})", car.id, car.name, car.state.label());
            }
        }

        if !state.events.is_empty() {
            println!("--- Recent Events ---");
            for event in state.events.iter().take(5) {
                println!("  {}", event);
            }
        }
    }

    /// Draw the lot as a row of slots followed by the queue
    pub fn draw_lot(&self) {
        let state = &self.state;
        let width = state
            .parked
            .iter()
            .filter_map(|car| car.slot_index)
            .map(|slot| slot + 1)
            .max()
            .unwrap_or(0)
            .max(state.capacity);

        let mut row = String::new();
        for slot in 0..width {
            let cell = match state.parked_in_slot(slot) {
                Some(car) => format!("[{:^6}]", car.id.0 .0),
                None if slot < state.capacity => "[      ]".to_string(),
                None => String::new(),
            };
            row.push_str(&cell);
        }
        println!("{}", row);

        let queue: Vec<String> = state
            .waiting
            .iter()
            .map(|car| {
                if car.is_blocked() {
                    format!("{}!", car.id.0 .0)
                } else {
                    car.id.0 .0.to_string()
                }
            })
            .collect();
        println!("gate <- {}", queue.join(" "));
    }
}
