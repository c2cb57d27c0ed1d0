//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Result, SimError};

/// How far the distribution fractions may stray from summing to exactly 1.0
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Largest lattice the initializer will build
pub const MAX_TOTAL_CELLS: u64 = u32::MAX as u64;

/// Simulation round counter
pub type Round = u64;

/// Contents of a single lattice cell
///
/// Agents carry no identity beyond their type; two `TypeA` cells are
/// interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    TypeA,
    TypeB,
}

impl CellState {
    #[inline]
    pub fn is_occupied(self) -> bool {
        self != CellState::Empty
    }

    /// Single character used by text snapshots
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::TypeA => 'A',
            CellState::TypeB => 'B',
        }
    }

    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            '.' | '_' => Some(CellState::Empty),
            'A' | 'a' => Some(CellState::TypeA),
            'B' | 'b' => Some(CellState::TypeB),
            _ => None,
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Per-round classification of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SatisfactionState {
    Satisfied,
    Unsatisfied,
    /// Empty cells have no opinion about their neighbors
    #[default]
    NotApplicable,
}

/// A validated (row, column) position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fractions of the lattice given to each cell state at initialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub type_a: f64,
    pub type_b: f64,
    pub empty: f64,
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            type_a: 0.4,
            type_b: 0.4,
            empty: 0.2,
        }
    }
}

impl Distribution {
    /// Build a distribution, rejecting negative or non-normalized fractions
    pub fn new(type_a: f64, type_b: f64, empty: f64) -> Result<Self> {
        let dist = Self {
            type_a,
            type_b,
            empty,
        };
        dist.validate()?;
        Ok(dist)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("type_a", self.type_a),
            ("type_b", self.type_b),
            ("empty", self.empty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidDistribution(format!(
                    "{} fraction must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        let sum = self.type_a + self.type_b + self.empty;
        if (sum - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(SimError::InvalidDistribution(format!(
                "fractions sum to {}, expected 1.0",
                sum
            )));
        }

        Ok(())
    }
}

/// Validate a satisfaction threshold
pub fn check_threshold(threshold: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(SimError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_distribution_is_valid() {
        assert!(Distribution::default().validate().is_ok());
    }

    #[test]
    fn test_distribution_rejects_negative_fraction() {
        let err = Distribution::new(1.2, -0.2, 0.0).unwrap_err();
        assert!(matches!(err, SimError::InvalidDistribution(_)));
    }

    #[test]
    fn test_distribution_rejects_bad_sum() {
        assert!(Distribution::new(0.5, 0.5, 0.5).is_err());
        assert!(Distribution::new(0.3, 0.3, 0.3).is_err());
    }

    #[test]
    fn test_distribution_rejects_nan() {
        assert!(Distribution::new(f64::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_distribution_accepts_within_tolerance() {
        assert!(Distribution::new(0.4, 0.4, 0.2 + 1e-9).is_ok());
    }

    #[test]
    fn test_threshold_bounds() {
        assert!(check_threshold(0.0).is_ok());
        assert!(check_threshold(1.0).is_ok());
        assert!(matches!(
            check_threshold(1.01),
            Err(SimError::InvalidThreshold(_))
        ));
        assert!(check_threshold(-0.1).is_err());
        assert!(check_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_glyph_roundtrip() {
        for state in [CellState::Empty, CellState::TypeA, CellState::TypeB] {
            assert_eq!(CellState::from_glyph(state.glyph()), Some(state));
        }
        assert_eq!(CellState::from_glyph('x'), None);
    }
}
