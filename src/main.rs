//! Segment Bounce headless runner
//!
//! Seeds the default scenario (random segments plus a few randomly aimed
//! particles), runs the requested number of ticks and prints the final
//! snapshot as JSON. Set `RUST_LOG=debug` to see individual collisions.

use std::path::PathBuf;

use clap::Parser;
use segment_bounce::{SimConfig, SimResult, Simulation};

/// Ticks to run when none are given
const DEFAULT_TICKS: u64 = 1000;
/// Extra particles spawned at the origin alongside the seed particle
const EXTRA_PARTICLES: usize = 4;

#[derive(Parser, Debug)]
#[command(version, about = "Run the particle simulation headless and print the final snapshot")]
struct Args {
    /// JSON config file; defaults are used when omitted
    config: Option<PathBuf>,
    /// Number of ticks to run
    #[arg(default_value_t = DEFAULT_TICKS)]
    ticks: u64,
}

fn main() {
    env_logger::init();
    log::info!("Segment Bounce (headless) starting...");

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> SimResult<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut sim = Simulation::new(config)?;
    sim.generate_random_segments();
    for _ in 0..EXTRA_PARTICLES {
        sim.spawn_random_at_origin();
    }

    for _ in 0..args.ticks {
        sim.tick();
    }
    log::info!(
        "Ran {} ticks with {} particles and {} segments",
        args.ticks,
        sim.particles().len(),
        sim.segment_store().segment_count()
    );

    println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    Ok(())
}
