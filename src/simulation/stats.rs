//! Grid statistics for hosts that observe the simulation between steps

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{check_threshold, CellState, Round, SatisfactionState};
use crate::simulation::satisfaction::{classify, tally_neighbors};
use crate::spatial::grid::Grid;

/// Number of cells in each state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Census {
    pub type_a: usize,
    pub type_b: usize,
    pub empty: usize,
}

impl Census {
    pub fn of(grid: &Grid) -> Self {
        grid.cells().fold(Self::default(), |mut census, (_, cell)| {
            match cell {
                CellState::TypeA => census.type_a += 1,
                CellState::TypeB => census.type_b += 1,
                CellState::Empty => census.empty += 1,
            }
            census
        })
    }

    pub fn agents(&self) -> usize {
        self.type_a + self.type_b
    }

    pub fn total(&self) -> usize {
        self.agents() + self.empty
    }
}

/// Snapshot of how content the population is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    /// Rounds completed when the snapshot was taken
    pub round: Round,
    pub satisfied: usize,
    pub unsatisfied: usize,
    /// Agents moved by the round that produced this snapshot
    pub moved: usize,
    /// Mean like-neighbor fraction over agents with at least one occupied
    /// neighbor; 0.5 is a well-mixed 50/50 population, 1.0 full segregation
    pub segregation: Option<f64>,
}

impl RoundStats {
    pub fn satisfied_fraction(&self) -> f64 {
        let agents = self.satisfied + self.unsatisfied;
        if agents == 0 {
            1.0
        } else {
            self.satisfied as f64 / agents as f64
        }
    }
}

/// Measure `grid` against `threshold`
pub fn measure(grid: &Grid, threshold: f64, round: Round, moved: usize) -> Result<RoundStats> {
    let threshold = check_threshold(threshold)?;

    let mut satisfied = 0;
    let mut unsatisfied = 0;
    let mut fraction_sum = 0.0;
    let mut counted = 0usize;

    for (coord, cell) in grid.cells().filter(|(_, c)| c.is_occupied()) {
        let tally = tally_neighbors(grid, coord, cell);
        match classify(cell, tally, threshold) {
            SatisfactionState::Satisfied => satisfied += 1,
            SatisfactionState::Unsatisfied => unsatisfied += 1,
            SatisfactionState::NotApplicable => {}
        }
        if let Some(fraction) = tally.like_fraction() {
            fraction_sum += fraction;
            counted += 1;
        }
    }

    Ok(RoundStats {
        round,
        satisfied,
        unsatisfied,
        moved,
        segregation: (counted > 0).then(|| fraction_sum / counted as f64),
    })
}
