pub mod output;
pub mod population;
pub mod relocation;
pub mod satisfaction;
pub mod stats;
pub mod tick;

pub use output::SimulationOutput;
pub use population::populate;
pub use relocation::{relocate, RelocationOutcome};
pub use satisfaction::evaluate;
pub use stats::{measure, Census, RoundStats};
pub use tick::{initialize, make_rng, read_cell, run_round, step, Simulation};
