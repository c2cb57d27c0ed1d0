//! Population initialization
//!
//! Builds a pool holding exactly the target number of each cell state,
//! shuffles it, and lays it into the grid row by row. Shuffling the pool
//! rather than sampling per cell keeps the type counts exact while every
//! arrangement stays equally likely.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::error::{Result, SimError};
use crate::core::types::{CellState, Distribution, MAX_TOTAL_CELLS};
use crate::simulation::stats::Census;
use crate::spatial::grid::Grid;

/// Absorbs binary representation error in `fraction * cells`
/// (0.29 * 100.0 evaluates to 28.999999999999996).
const COUNT_SLACK: f64 = 1e-9;

/// Side length of the largest square lattice that fits in `total_cells`
pub fn side_length(total_cells: u64) -> usize {
    let total = total_cells as u128;
    let mut side = (total_cells as f64).sqrt() as u128;
    while side > 0 && side * side > total {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= total {
        side += 1;
    }
    side as usize
}

/// Exact per-state counts for a lattice of `cells` cells
///
/// Agent counts round down; the remainder becomes vacancies.
pub fn target_counts(cells: usize, distribution: &Distribution) -> Result<Census> {
    distribution.validate()?;

    let floor_share = |fraction: f64| (fraction * cells as f64 + COUNT_SLACK).floor() as usize;
    let type_a = floor_share(distribution.type_a);
    let type_b = floor_share(distribution.type_b);

    let empty = cells
        .checked_sub(type_a + type_b)
        .ok_or_else(|| {
            SimError::InvalidDistribution(format!(
                "{} agents requested for only {} cells",
                type_a + type_b,
                cells
            ))
        })?;

    Ok(Census {
        type_a,
        type_b,
        empty,
    })
}

/// Unshuffled pool: all `TypeA`, then `TypeB`, then `Empty`
pub fn build_pool(counts: &Census) -> Vec<CellState> {
    let mut pool = Vec::with_capacity(counts.total());
    pool.extend(std::iter::repeat(CellState::TypeA).take(counts.type_a));
    pool.extend(std::iter::repeat(CellState::TypeB).take(counts.type_b));
    pool.extend(std::iter::repeat(CellState::Empty).take(counts.empty));
    pool
}

/// Create a grid of `floor(sqrt(total_cells))²` cells with a uniformly
/// random placement matching `distribution`
///
/// Requests above `MAX_TOTAL_CELLS` are rejected before anything is allocated.
pub fn populate<R: Rng + ?Sized>(
    total_cells: u64,
    distribution: &Distribution,
    rng: &mut R,
) -> Result<Grid> {
    if total_cells > MAX_TOTAL_CELLS {
        return Err(SimError::InvalidConfig(format!(
            "total_cells ({}) exceeds {}",
            total_cells, MAX_TOTAL_CELLS
        )));
    }

    let side = side_length(total_cells);
    let counts = target_counts(side * side, distribution)?;

    let mut pool = build_pool(&counts);
    pool.shuffle(rng);

    let grid = Grid::from_cells(side, pool)?;

    tracing::info!(
        side,
        type_a = counts.type_a,
        type_b = counts.type_b,
        empty = counts.empty,
        "Population initialized"
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_side_length_rounds_down() {
        assert_eq!(side_length(0), 0);
        assert_eq!(side_length(1), 1);
        assert_eq!(side_length(8), 2);
        assert_eq!(side_length(9), 3);
        assert_eq!(side_length(90_000), 300);
        assert_eq!(side_length(90_600), 300);
        assert_eq!(side_length(u32::MAX as u64), 65_535);
    }

    #[test]
    fn test_target_counts_exact() {
        let counts = target_counts(10_000, &Distribution::default()).unwrap();
        assert_eq!(counts.type_a, 4000);
        assert_eq!(counts.type_b, 4000);
        assert_eq!(counts.empty, 2000);
    }

    #[test]
    fn test_target_counts_remainder_goes_to_empty() {
        // 9 cells: floor(3.6) = 3 of each type, 3 vacancies
        let counts = target_counts(9, &Distribution::default()).unwrap();
        assert_eq!(counts.type_a, 3);
        assert_eq!(counts.type_b, 3);
        assert_eq!(counts.empty, 3);
        assert_eq!(counts.total(), 9);
    }

    #[test]
    fn test_target_counts_absorbs_float_error() {
        let dist = Distribution::new(0.29, 0.51, 0.2).unwrap();
        let counts = target_counts(100, &dist).unwrap();
        assert_eq!(counts.type_a, 29);
        assert_eq!(counts.type_b, 51);
        assert_eq!(counts.empty, 20);
    }

    #[test]
    fn test_target_counts_full_occupancy() {
        let dist = Distribution::new(0.5, 0.5, 0.0).unwrap();
        let counts = target_counts(16, &dist).unwrap();
        assert_eq!(counts.empty, 0);
    }

    #[test]
    fn test_target_counts_rejects_invalid_distribution() {
        let dist = Distribution {
            type_a: 0.7,
            type_b: 0.7,
            empty: -0.4,
        };
        assert!(matches!(
            target_counts(100, &dist),
            Err(SimError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_build_pool_counts() {
        let pool = build_pool(&Census {
            type_a: 2,
            type_b: 3,
            empty: 1,
        });
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.iter().filter(|&&c| c == CellState::TypeB).count(), 3);
    }

    #[test]
    fn test_populate_matches_targets() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = populate(10_000, &Distribution::default(), &mut rng).unwrap();
        assert_eq!(grid.size(), 100);
        assert_eq!(grid.count(CellState::TypeA), 4000);
        assert_eq!(grid.count(CellState::TypeB), 4000);
        assert_eq!(grid.count(CellState::Empty), 2000);
    }

    #[test]
    fn test_populate_non_square_request() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = populate(50, &Distribution::default(), &mut rng).unwrap();
        assert_eq!(grid.size(), 7);
        assert_eq!(Census::of(&grid).total(), 49);
    }

    #[test]
    fn test_populate_is_seed_deterministic() {
        let a = populate(400, &Distribution::default(), &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = populate(400, &Distribution::default(), &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let c = populate(400, &Distribution::default(), &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_populate_rejects_oversized_request() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for total in [MAX_TOTAL_CELLS + 1, u64::MAX] {
            assert!(matches!(
                populate(total, &Distribution::default(), &mut rng),
                Err(SimError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_populate_rejects_bad_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let dist = Distribution {
            type_a: 0.5,
            type_b: 0.5,
            empty: 0.5,
        };
        assert!(populate(100, &dist, &mut rng).is_err());
    }
}
