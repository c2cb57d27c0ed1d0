//! Headless Runner
//!
//! Runs a fixed number of rounds without a display and reports how the
//! population settled. Optionally writes the full per-round history as JSON.

use clap::Parser;
use schelling::core::config::SimulationConfig;
use schelling::core::error::Result;
use schelling::simulation::{Simulation, SimulationOutput};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Headless Schelling runner
#[derive(Parser, Debug)]
#[command(name = "headless_run")]
#[command(about = "Run a Schelling segregation model for N rounds and report statistics")]
struct Args {
    /// TOML config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Requested number of cells (grid side is floor(sqrt))
    #[arg(long)]
    total_cells: Option<u64>,

    /// Fraction of like neighbors an agent needs to stay put
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of rounds to run
    #[arg(long)]
    rounds: Option<u64>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after the first round that moves nobody
    #[arg(long)]
    until_stable: bool,

    /// Write the run history as JSON to this path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Print the final grid
    #[arg(long)]
    show: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schelling=info")),
        )
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let threshold = config.threshold;

    let start = Instant::now();
    let mut sim = Simulation::from_config(&config)?;
    let initial = sim.census();
    let mut history = vec![sim.stats(threshold)?];

    for _ in 0..config.rounds {
        sim.step(threshold)?;
        history.push(sim.stats(threshold)?);
        if args.until_stable && sim.is_settled() {
            break;
        }
    }
    let stabilized = sim.is_settled();

    tracing::info!(rounds = sim.round(), stabilized, "Run finished");

    let output = SimulationOutput::new(
        config,
        sim.grid().size(),
        initial,
        sim.census(),
        history,
        sim.round(),
        stabilized,
        start.elapsed(),
    );

    if args.show {
        print!("{}", sim.grid());
    }
    println!("{}", output.summary());

    if let Some(path) = &args.output {
        std::fs::write(path, output.to_json()?)?;
        println!("Full output written to {}", path.display());
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(total_cells) = args.total_cells {
        config.total_cells = total_cells;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}
