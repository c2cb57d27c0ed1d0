//! Satisfaction evaluation
//!
//! Classifies every cell from a single read-only snapshot of the grid.
//! Off-grid neighbors are absent: they count toward neither the like nor
//! the occupied total. An agent with no occupied neighbors is Satisfied.

use crate::core::error::Result;
use crate::core::types::{check_threshold, CellState, Coord, SatisfactionState};
use crate::spatial::grid::{Grid, SatisfactionMap};

/// Composition of an agent's occupied Moore neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborTally {
    /// Occupied neighbors sharing the center's type
    pub like: u8,
    /// Occupied neighbors of any type
    pub occupied: u8,
}

impl NeighborTally {
    /// Fraction of occupied neighbors sharing the center's type, if any are occupied
    pub fn like_fraction(&self) -> Option<f64> {
        if self.occupied == 0 {
            None
        } else {
            Some(self.like as f64 / self.occupied as f64)
        }
    }
}

/// Count like and occupied neighbors around `coord` as seen by an agent of type `kind`
pub fn tally_neighbors(grid: &Grid, coord: Coord, kind: CellState) -> NeighborTally {
    grid.neighbors(coord)
        .filter(|n| n.is_occupied())
        .fold(NeighborTally::default(), |mut tally, n| {
            tally.occupied += 1;
            if n == kind {
                tally.like += 1;
            }
            tally
        })
}

/// Classify one cell given its neighborhood tally
pub fn classify(cell: CellState, tally: NeighborTally, threshold: f64) -> SatisfactionState {
    if !cell.is_occupied() {
        return SatisfactionState::NotApplicable;
    }
    match tally.like_fraction() {
        None => SatisfactionState::Satisfied,
        Some(fraction) if fraction >= threshold => SatisfactionState::Satisfied,
        Some(_) => SatisfactionState::Unsatisfied,
    }
}

/// Classify every cell of `grid` against `threshold`
pub fn evaluate(grid: &Grid, threshold: f64) -> Result<SatisfactionMap> {
    let threshold = check_threshold(threshold)?;

    let states = grid
        .cells()
        .map(|(coord, cell)| {
            if !cell.is_occupied() {
                return SatisfactionState::NotApplicable;
            }
            classify(cell, tally_neighbors(grid, coord, cell), threshold)
        })
        .collect();

    SatisfactionMap::from_cells(grid.size(), states)
}
