//! Virtual clock and timer bookkeeping

use parking_sim::simulation::{scaled_interval, CarId, Scheduler, SimId, TimerConcern};

#[test]
fn test_timers_fire_in_deadline_order() {
    let mut scheduler = Scheduler::new();
    let car = CarId(SimId(3));
    scheduler.schedule(TimerConcern::Admission, 2000, None);
    scheduler.schedule(TimerConcern::Exit(car), 800, None);

    assert_eq!(scheduler.next_deadline(), Some(800));
    assert_eq!(scheduler.pop_due(5000), Some(TimerConcern::Exit(car)));
    assert_eq!(scheduler.now(), 800);
    assert_eq!(scheduler.pop_due(5000), Some(TimerConcern::Admission));
    assert_eq!(scheduler.now(), 2000);
    assert_eq!(scheduler.pop_due(5000), None);
}

#[test]
fn test_pop_due_respects_horizon() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(TimerConcern::Arrival, 1000, None);

    assert_eq!(scheduler.pop_due(999), None);
    assert_eq!(scheduler.now(), 0);
    assert_eq!(scheduler.pop_due(1000), Some(TimerConcern::Arrival));
}

#[test]
fn test_rescheduling_replaces_pending_timer() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(TimerConcern::Admission, 2000, Some(2000));
    scheduler.schedule(TimerConcern::Admission, 1000, Some(1000));

    assert_eq!(scheduler.pending_count(), 1);
    assert_eq!(scheduler.period_of(TimerConcern::Admission), Some(1000));
    assert_eq!(scheduler.next_deadline(), Some(1000));
}

#[test]
fn test_periodic_timer_rearms() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(TimerConcern::Admission, 500, Some(500));

    let mut fired = 0;
    while scheduler.pop_due(2000).is_some() {
        fired += 1;
    }

    assert_eq!(fired, 4);
    assert_eq!(scheduler.next_deadline(), Some(2500));
    assert!(scheduler.is_scheduled(TimerConcern::Admission));
}

#[test]
fn test_cancel() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule(TimerConcern::Arrival, 100, Some(100));
    scheduler.schedule(TimerConcern::Exit(CarId(SimId(0))), 800, None);

    assert!(scheduler.cancel(TimerConcern::Arrival));
    assert!(!scheduler.cancel(TimerConcern::Arrival));
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.cancel_all();
    assert_eq!(scheduler.pending_count(), 0);
    assert_eq!(scheduler.next_deadline(), None);
}

#[test]
fn test_clock_never_runs_backwards() {
    let mut scheduler = Scheduler::new();
    scheduler.advance_to(1000);
    scheduler.advance_to(400);
    assert_eq!(scheduler.now(), 1000);

    scheduler.schedule(TimerConcern::Arrival, 50, None);
    assert_eq!(scheduler.next_deadline(), Some(1050));
}

#[test]
fn test_scaled_interval() {
    assert_eq!(scaled_interval(2000.0, 1.0), 2000);
    assert_eq!(scaled_interval(2000.0, 0.5), 4000);
    assert_eq!(scaled_interval(2000.0, 3.0), 667);
}
