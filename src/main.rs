//! Schelling - Entry Point
//!
//! Interactive console host: builds a simulation from config, then steps it
//! on request and prints the grid and statistics between steps.

use clap::Parser;
use schelling::core::config::SimulationConfig;
use schelling::core::error::Result;
use schelling::simulation::Simulation;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Largest grid side printed by `show`
const MAX_SHOW_SIDE: usize = 120;

/// Interactive Schelling segregation console
#[derive(Parser, Debug)]
#[command(name = "schelling")]
#[command(about = "Step a Schelling segregation model from the terminal")]
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

    /// Random seed for replayable runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("schelling=info")),
        )
        .init();

    let args = Args::parse();
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
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut sim = Simulation::from_config(&config)?;
    let threshold = config.threshold;

    println!("\n=== SCHELLING ===");
    println!(
        "{}x{} grid, threshold {:.2}, seed {}",
        sim.grid().size(),
        sim.grid().size(),
        threshold,
        sim.seed().map_or_else(|| "random".to_string(), |s| s.to_string())
    );
    println!();
    println!("Commands:");
    println!("  step / t        - Advance simulation by one round");
    println!("  run <n>         - Run n rounds");
    println!("  status / s      - Show satisfaction statistics");
    println!("  show            - Print the grid (A, B, . for vacant)");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("[round {}] > ", sim.round());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "step" || input == "t" {
            sim.step(threshold)?;
            display_round(&sim);
            continue;
        }

        if input == "status" || input == "s" {
            display_status(&sim, threshold)?;
            continue;
        }

        if input == "show" {
            if sim.grid().size() > MAX_SHOW_SIDE {
                println!(
                    "Grid is {}x{}; show is limited to {}x{}",
                    sim.grid().size(),
                    sim.grid().size(),
                    MAX_SHOW_SIDE,
                    MAX_SHOW_SIDE
                );
            } else {
                print!("{}", sim.grid());
            }
            continue;
        }

        if let Some(arg) = input.strip_prefix("run ") {
            match arg.trim().parse::<u64>() {
                Ok(n) => {
                    println!("Running {} rounds...", n);
                    for _ in 0..n {
                        sim.step(threshold)?;
                        if sim.is_settled() {
                            println!("Nobody moved in round {}; stopping early.", sim.round());
                            break;
                        }
                    }
                    display_round(&sim);
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        println!("Unknown command. Available: step, run <n>, status, show, quit");
    }

    println!("\nFinal state after {} rounds.", sim.round());
    Ok(())
}

/// One-line report of the latest round
fn display_round(sim: &Simulation) {
    if let Some(outcome) = sim.last_outcome() {
        println!(
            "Round {}: {} unsatisfied, {} vacancies, {} moved",
            sim.round(),
            outcome.unsatisfied,
            outcome.vacancies,
            outcome.moved
        );
    }
}

fn display_status(sim: &Simulation, threshold: f64) -> Result<()> {
    let census = sim.census();
    let stats = sim.stats(threshold)?;

    println!();
    println!("=== Status (Round {}) ===", sim.round());
    println!(
        "  Agents: {} A, {} B | Vacant: {}",
        census.type_a, census.type_b, census.empty
    );
    println!(
        "  Satisfied: {} ({:.1}%) | Unsatisfied: {}",
        stats.satisfied,
        stats.satisfied_fraction() * 100.0,
        stats.unsatisfied
    );
    match stats.segregation {
        Some(seg) => println!("  Mean like-neighbor fraction: {:.3}", seg),
        None => println!("  Mean like-neighbor fraction: n/a"),
    }
    println!("  Stable: {}", sim.is_stable(threshold)?);
    println!();
    Ok(())
}
