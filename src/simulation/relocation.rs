//! Relocation of unsatisfied agents
//!
//! Visiting order and destinations are both shuffled, then paired off
//! one to one. Destinations come from the vacancies present before the
//! round starts, so a cell vacated this round is not reused until the next
//! one, and no agent can move twice.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::{CellState, Coord, SatisfactionState};
use crate::spatial::grid::{Grid, SatisfactionMap};

/// What happened during one relocation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelocationOutcome {
    /// Agents classified Unsatisfied at the start of the round
    pub unsatisfied: usize,
    /// Vacancies available at the start of the round
    pub vacancies: usize,
    /// Agents actually moved: `min(unsatisfied, vacancies)`
    pub moved: usize,
}

/// Move one agent from `from` to the vacancy at `to`
///
/// Both endpoints are checked before either is written.
pub fn move_agent(grid: &mut Grid, from: Coord, to: Coord) -> Result<()> {
    let agent = grid.get(from.row as i64, from.col as i64)?;
    let target = grid.get(to.row as i64, to.col as i64)?;

    if !agent.is_occupied() {
        return Err(SimError::InvalidGrid(format!(
            "no agent to move at ({}, {})",
            from.row, from.col
        )));
    }
    if target.is_occupied() {
        return Err(SimError::InvalidGrid(format!(
            "destination ({}, {}) is occupied",
            to.row, to.col
        )));
    }

    grid.set_at(to, agent)?;
    grid.set_at(from, CellState::Empty)?;
    Ok(())
}

/// Move every Unsatisfied agent in `states` to a distinct random vacancy
///
/// When there are fewer vacancies than unsatisfied agents, the agents left
/// over at the end of the shuffled order stay put until the next round.
pub fn relocate<R: Rng + ?Sized>(
    grid: &mut Grid,
    states: &SatisfactionMap,
    rng: &mut R,
) -> Result<RelocationOutcome> {
    if states.size() != grid.size() {
        return Err(SimError::SizeMismatch {
            grid: grid.size(),
            states: states.size(),
        });
    }

    // Only agents still present in the grid can move
    let mut movers: Vec<Coord> = states
        .positions_of(SatisfactionState::Unsatisfied)
        .into_iter()
        .filter(|&c| grid.at(c).is_some_and(CellState::is_occupied))
        .collect();
    let mut vacancies = grid.positions_of(CellState::Empty);

    movers.shuffle(rng);
    vacancies.shuffle(rng);

    let mut outcome = RelocationOutcome {
        unsatisfied: movers.len(),
        vacancies: vacancies.len(),
        moved: 0,
    };

    for (from, to) in movers.into_iter().zip(vacancies) {
        move_agent(grid, from, to)?;
        outcome.moved += 1;
    }

    Ok(outcome)
}
