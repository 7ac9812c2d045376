use std::time::Instant;

use tracing::{info, Level};

use collision_sim::config::SimConfig;
use collision_sim::sim::constants::tick;
use collision_sim::sim::performance::PerformanceMonitor;
use collision_sim::sim::simulation::Simulation;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Collision Sim v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = SimConfig::load_or_default();
    config.validate()?;
    info!(
        "Configuration loaded: {}x{} arena, {} particles, detector={}",
        config.arena_width,
        config.arena_height,
        config.initial_particles,
        config.detector.display_name()
    );

    let mut sim = Simulation::new(config.arena_width, config.arena_height);
    sim.set_detector(
        config.detector.build(config.cell_size),
        config.detector.display_name(),
    );
    sim.generate_particles(config.initial_particles);

    // The core trusts dt as-is, so the clamp lives here at the caller
    let dt = config.dt.min(tick::MAX_DT);
    let ticks_per_report = (1.0 / dt).ceil() as u64;

    let mut monitor = PerformanceMonitor::new(tick::TICK_RATE);
    for current_tick in 1..=config.ticks {
        let start = Instant::now();
        sim.update(dt);
        monitor.record(start.elapsed());

        // Report once per simulated second
        if current_tick % ticks_per_report == 0 {
            info!(
                "tick {}/{}: {} particles, avg step {:?}, p95 {:?}, budget {:.0}%",
                current_tick,
                config.ticks,
                sim.particle_count(),
                monitor.average(),
                monitor.p95(),
                monitor.budget_usage() * 100.0
            );
        }
    }

    info!(
        "Finished {} ticks with {} ({} particles): avg step {:?}, p95 {:?}, max {:?}",
        config.ticks,
        sim.current_algorithm_name(),
        sim.particle_count(),
        monitor.average(),
        monitor.p95(),
        monitor.max()
    );

    Ok(())
}
