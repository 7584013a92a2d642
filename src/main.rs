use anyhow::{ensure, Result};
use clap::Parser;
use log::info;

use parking_sim::simulation::{Engine, EngineConfig, SimulationStats};

#[derive(Parser)]
#[command(name = "parking_sim")]
#[command(about = "Producer/consumer parking lot simulation guarded by semaphores")]
struct Cli {
    /// Number of parking slots (clamped to 1..=10)
    #[arg(long, default_value = "5")]
    capacity: i64,

    /// Speed multiplier (clamped to 0.5..=3)
    #[arg(long, default_value = "1.0")]
    speed: f64,

    /// Disable synchronization to expose races
    #[arg(long)]
    chaos: bool,

    /// Admit one car per report instead of running the admission timer
    #[arg(long)]
    step_mode: bool,

    /// Keep spawning cars on a timer while the queue is short
    #[arg(long)]
    auto_spawn: bool,

    /// Cars queued at the start
    #[arg(long, default_value = "8")]
    cars: usize,

    /// Simulated run length in milliseconds
    #[arg(long, default_value = "30000")]
    duration: u64,

    /// Simulated milliseconds between reports
    #[arg(long, default_value = "2000")]
    report_every: u64,

    /// Release the oldest parked car every N simulated ms (0 disables)
    #[arg(long, default_value = "2500")]
    depart_every: u64,

    /// Seed for reproducible car colors and names
    #[arg(long)]
    seed: Option<u64>,

    /// Only log the final statistics
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    ensure!(cli.report_every > 0, "--report-every must be greater than zero");

    let mut config = EngineConfig::new()
        .with_capacity(cli.capacity)
        .with_speed(cli.speed);
    config.chaos_mode = cli.chaos;
    config.step_mode = cli.step_mode;
    config.auto_spawn = cli.auto_spawn;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    run_headless(Engine::new(config), &cli);
    Ok(())
}

/// Run the simulation in headless mode on the virtual clock
fn run_headless(mut engine: Engine, cli: &Cli) {
    info!("Running parking simulation in headless mode...");
    info!(
        "Capacity: {}, Speed: {}x, Chaos: {}, Step mode: {}",
        engine.state().capacity,
        engine.state().speed,
        engine.state().chaos_mode,
        engine.state().step_mode
    );

    for _ in 0..cli.cars {
        engine.add_car();
    }
    if !engine.state().step_mode {
        engine.toggle_running();
    }

    if !cli.quiet {
        println!("Initial state:");
        engine.print_summary();
        engine.draw_lot();
        println!();
    }

    let mut elapsed = 0;
    let mut next_departure = cli.depart_every;
    while elapsed < cli.duration {
        let chunk = cli.report_every.min(cli.duration - elapsed);
        let target = elapsed + chunk;

        // Interleave departures with the timers inside this chunk
        while cli.depart_every > 0 && next_departure <= target {
            engine.advance(next_departure - elapsed);
            elapsed = next_departure;
            engine.remove_oldest_parked();
            next_departure += cli.depart_every;
        }
        engine.advance(target - elapsed);
        elapsed = target;

        if engine.state().step_mode {
            engine.step();
        }

        if !cli.quiet {
            println!("--- After {:.1}s simulated time ---", elapsed as f64 / 1000.0);
            engine.print_summary();
            engine.draw_lot();
            println!();
        }
    }

    let state = engine.state();
    let stats = engine.stats();
    info!("=== SIMULATION COMPLETE ===");
    info!("Elapsed time: {:.2}s", engine.now() as f64 / 1000.0);
    info!("Total cars arrived: {}", stats.total_arrived);
    info!("Total cars parked: {}", stats.total_parked);
    info!("Total cars exited: {}", stats.total_exited);
    info!("Average wait: {:.2}s", stats.average_wait_ms() / 1000.0);
    info!("Blocking events: {}", stats.blocking_events);
    info!("Chaos collisions: {}", stats.chaos_collisions);
    info!("Peak occupancy: {}", stats.peak_occupancy);
    info!(
        "Occupancy: {}%",
        SimulationStats::occupancy_percent(state.parked.len(), state.capacity)
    );
    info!(
        "Semaphores consistent: {}",
        state.chaos_mode || state.is_consistent()
    );
}
