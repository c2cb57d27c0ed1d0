//! Step driver - orchestrates one simulation round
//!
//! A round is evaluate -> relocate, in that order, over the whole grid.
//! The driver has no notion of time: the host decides when to call `step`
//! and reads the grid only between calls.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{CellState, Distribution, Round, SatisfactionState};
use crate::simulation::population::populate;
use crate::simulation::relocation::{relocate, RelocationOutcome};
use crate::simulation::satisfaction::evaluate;
use crate::simulation::stats::{measure, Census, RoundStats};
use crate::spatial::grid::Grid;

/// Seeded generator for replayable runs, fresh entropy otherwise
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Build a populated grid from an external random source
///
/// Same as `populate`; paired with `step` for hosts that keep their own rng.
pub fn initialize<R: Rng + ?Sized>(
    total_cells: u64,
    distribution: &Distribution,
    rng: &mut R,
) -> Result<Grid> {
    populate(total_cells, distribution, rng)
}

/// Run one round and report what the relocation pass did
///
/// The threshold is validated before the grid is touched.
pub fn run_round<R: Rng + ?Sized>(
    grid: &mut Grid,
    threshold: f64,
    rng: &mut R,
) -> Result<RelocationOutcome> {
    let states = evaluate(grid, threshold)?;
    relocate(grid, &states, rng)
}

/// Advance `grid` by one round
pub fn step<R: Rng + ?Sized>(grid: &mut Grid, threshold: f64, rng: &mut R) -> Result<()> {
    run_round(grid, threshold, rng).map(|_| ())
}

/// Bounds-checked cell read
pub fn read_cell(grid: &Grid, row: i64, col: i64) -> Result<CellState> {
    grid.get(row, col)
}

/// A running simulation: the grid plus the random source that drives it
///
/// Owns its state outright; there is no process-wide instance. Hosts that
/// render from another thread should wrap the whole `Simulation` in a
/// mutex held for the duration of each `step`.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    rng: ChaCha8Rng,
    seed: Option<u64>,
    round: Round,
    last_outcome: Option<RelocationOutcome>,
}

impl Simulation {
    /// Populate a fresh grid of `floor(sqrt(total_cells))²` cells
    pub fn initialize(
        total_cells: u64,
        distribution: &Distribution,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut rng = make_rng(seed);
        let grid = initialize(total_cells, distribution, &mut rng)?;
        Ok(Self {
            grid,
            rng,
            seed,
            round: 0,
            last_outcome: None,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Self::initialize(config.total_cells, &config.distribution, config.seed)
    }

    /// Start from an existing grid, e.g. a hand-built scenario
    pub fn from_grid(grid: Grid, seed: Option<u64>) -> Self {
        Self {
            grid,
            rng: make_rng(seed),
            seed,
            round: 0,
            last_outcome: None,
        }
    }

    /// Advance by one round
    pub fn step(&mut self, threshold: f64) -> Result<()> {
        let outcome = run_round(&mut self.grid, threshold, &mut self.rng)?;
        self.round += 1;

        tracing::debug!(
            round = self.round,
            unsatisfied = outcome.unsatisfied,
            vacancies = outcome.vacancies,
            moved = outcome.moved,
            "Round complete"
        );

        self.last_outcome = Some(outcome);
        Ok(())
    }

    pub fn read_cell(&self, row: i64, col: i64) -> Result<CellState> {
        read_cell(&self.grid, row, col)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Rounds completed so far
    pub fn round(&self) -> Round {
        self.round
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Relocation result of the most recent round, if any has run
    pub fn last_outcome(&self) -> Option<RelocationOutcome> {
        self.last_outcome
    }

    pub fn census(&self) -> Census {
        Census::of(&self.grid)
    }

    pub fn stats(&self, threshold: f64) -> Result<RoundStats> {
        let moved = self.last_outcome.map_or(0, |o| o.moved);
        measure(&self.grid, threshold, self.round, moved)
    }

    /// True once a round has run and moved nobody
    ///
    /// A round that moves no one leaves the grid unchanged, so every later
    /// round does the same. Costs nothing, unlike `is_stable`.
    pub fn is_settled(&self) -> bool {
        self.last_outcome.is_some_and(|o| o.moved == 0)
    }

    /// True when another round cannot change the grid: every agent is
    /// content, or there is nowhere to move
    pub fn is_stable(&self, threshold: f64) -> Result<bool> {
        let states = evaluate(&self.grid, threshold)?;
        Ok(states.count(SatisfactionState::Unsatisfied) == 0
            || self.grid.count(CellState::Empty) == 0)
    }
}
