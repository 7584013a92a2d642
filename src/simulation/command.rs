//! Command reducer
//!
//! `reduce` is a pure function of the current snapshot, the command and
//! the current virtual time. It returns the next snapshot together with the
//! effects (timer changes, notifications) the engine must carry out.

use ordered_float::OrderedFloat;

use super::admission::{admit_chaos, admit_synchronized, AdmissionOutcome};
use super::car::CarSpec;
use super::config::{clamp_capacity, clamp_speed};
use super::release::{finish_exit, release_oldest, release_slot, remove_from_queue};
use super::scheduler::TimerConcern;
use super::semaphore::Semaphores;
use super::state::SimulationState;
use super::stats::SimulationStats;
use super::types::{
    scaled_interval, CarId, SimTime, AUTO_SPAWN_SOFT_CAP, BASE_ADMISSION_INTERVAL_MS,
    BASE_ARRIVAL_INTERVAL_MS, EXIT_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new car to the queue
    AddCar(CarSpec),
    /// Timer-driven arrival; skipped once the queue reaches the soft cap
    AutoSpawn(CarSpec),
    RemoveOldestParked,
    RemoveFromSlot(usize),
    RemoveFromQueue(CarId),
    ToggleRunning,
    Reset,
    SetSpeed(f64),
    SetCapacity(i64),
    ToggleChaosMode,
    ToggleStepMode,
    /// Manual admission step
    Step,
    /// Timer-driven admission step
    AdmissionTick,
    ToggleAutoSpawn,
    SelectCar(Option<CarId>),
    /// The exit delay of a car has elapsed
    FinishExit(CarId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
}

/// User-facing message. Fire and forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)arm a timer; replaces any pending timer for the same concern
    Schedule {
        concern: TimerConcern,
        delay: SimTime,
        period: Option<SimTime>,
    },
    Cancel(TimerConcern),
    /// Drop every pending timer
    CancelAll,
    Notify(Notification),
}

/// Result of reducing one command
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SimulationState,
    pub effects: Vec<Effect>,
}

/// Apply `command` to `state` at virtual time `now`
pub fn reduce(state: &SimulationState, command: &Command, now: SimTime) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();
    let mut restart_admission = false;

    match command {
        Command::AddCar(spec) => {
            next.enqueue(spec.clone(), now);
        }
        Command::AutoSpawn(spec) => {
            if next.auto_spawn && next.waiting.len() < AUTO_SPAWN_SOFT_CAP {
                next.enqueue(spec.clone(), now);
            }
        }
        Command::RemoveOldestParked => {
            if let Some(car_id) = release_oldest(&mut next, now) {
                effects.push(exit_timer(car_id));
            }
        }
        Command::RemoveFromSlot(slot_index) => {
            if let Some(car_id) = release_slot(&mut next, *slot_index, now) {
                effects.push(exit_timer(car_id));
            }
        }
        Command::RemoveFromQueue(car_id) => {
            remove_from_queue(&mut next, *car_id);
        }
        Command::ToggleRunning => {
            next.is_running = !next.is_running;
        }
        Command::Reset => {
            effects.push(Effect::CancelAll);
            next.waiting.clear();
            next.parked.clear();
            next.exiting.clear();
            next.events.clear();
            next.stats = SimulationStats::new();
            next.semaphores = Semaphores::new(next.capacity);
            next.is_running = false;
            next.auto_spawn = false;
            next.selected = None;
            effects.push(Effect::Notify(Notification::info("Simulation reset")));
        }
        Command::SetSpeed(speed) => {
            if let Some(speed) = clamp_speed(*speed) {
                next.speed = OrderedFloat(speed);
            }
        }
        Command::SetCapacity(requested) => {
            let capacity = clamp_capacity(*requested);
            if capacity as i64 != *requested {
                effects.push(Effect::Notify(Notification::info(format!(
                    "Capacity clamped to {}",
                    capacity
                ))));
            }
            next.capacity = capacity;
            next.semaphores = Semaphores::from_occupancy(capacity, next.parked.len());
            restart_admission = true;
        }
        Command::ToggleChaosMode => {
            next.chaos_mode = !next.chaos_mode;
            // A refusal under one mode says nothing about the other
            if let Some(head) = next.waiting.front_mut() {
                head.unblock();
            }
            restart_admission = true;
            if next.chaos_mode {
                effects.push(Effect::Notify(Notification::warning(
                    "Chaos mode enabled: semaphores are bypassed",
                )));
            } else {
                next.semaphores = Semaphores::from_occupancy(next.capacity, next.parked.len());
                effects.push(Effect::Notify(Notification::success(
                    "Synchronization restored",
                )));
            }
        }
        Command::ToggleStepMode => {
            next.step_mode = !next.step_mode;
            if next.step_mode {
                next.is_running = false;
            }
        }
        Command::Step => {
            admit(&mut next, now, &mut effects);
        }
        Command::AdmissionTick => {
            if next.is_running && !next.step_mode {
                admit(&mut next, now, &mut effects);
            }
        }
        Command::ToggleAutoSpawn => {
            next.auto_spawn = !next.auto_spawn;
        }
        Command::SelectCar(selection) => match selection {
            Some(car_id) if next.find_car(*car_id).is_some() => next.selected = Some(*car_id),
            Some(_) => {}
            None => next.selected = None,
        },
        Command::FinishExit(car_id) => {
            finish_exit(&mut next, *car_id);
        }
    }

    effects.extend(timer_effects(state, &next, restart_admission));

    if next != *state {
        next.version = state.version + 1;
    }

    Transition {
        state: next,
        effects,
    }
}

fn admit(state: &mut SimulationState, now: SimTime, effects: &mut Vec<Effect>) {
    let outcome = if state.chaos_mode {
        admit_chaos(state, now)
    } else {
        admit_synchronized(state, now)
    };

    match outcome {
        AdmissionOutcome::Blocked {
            car_id,
            semaphore: None,
        } => effects.push(Effect::Notify(Notification::warning(format!(
            "Collision! {} found no free slot without synchronization",
            car_id
        )))),
        AdmissionOutcome::Blocked {
            car_id,
            semaphore: Some(semaphore),
        } => effects.push(Effect::Notify(Notification::info(format!(
            "{} is blocked on wait({})",
            car_id,
            semaphore.label()
        )))),
        AdmissionOutcome::Parked { .. }
        | AdmissionOutcome::StillBlocked { .. }
        | AdmissionOutcome::Idle => {}
    }
}

fn exit_timer(car_id: CarId) -> Effect {
    Effect::Schedule {
        concern: TimerConcern::Exit(car_id),
        delay: EXIT_DELAY_MS,
        period: None,
    }
}

fn admission_period(state: &SimulationState) -> Option<SimTime> {
    (state.is_running && !state.step_mode)
        .then(|| scaled_interval(BASE_ADMISSION_INTERVAL_MS, state.speed.0))
}

pub(crate) fn arrival_period(state: &SimulationState) -> Option<SimTime> {
    state
        .auto_spawn
        .then(|| scaled_interval(BASE_ARRIVAL_INTERVAL_MS, state.speed.0))
}

/// Cancel and re-arm exactly the timers whose configuration changed
fn timer_effects(
    prev: &SimulationState,
    next: &SimulationState,
    restart_admission: bool,
) -> Vec<Effect> {
    let mut effects = Vec::new();

    let periodic = [
        (
            TimerConcern::Admission,
            admission_period(prev),
            admission_period(next),
            restart_admission,
        ),
        (
            TimerConcern::Arrival,
            arrival_period(prev),
            arrival_period(next),
            false,
        ),
    ];

    for (concern, before, after, force) in periodic {
        if before == after && !force {
            continue;
        }
        effects.push(Effect::Cancel(concern));
        if let Some(period) = after {
            effects.push(Effect::Schedule {
                concern,
                delay: period,
                period: Some(period),
            });
        }
    }

    effects
}
