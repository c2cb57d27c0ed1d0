//! Square lattice storage
//!
//! `Lattice<T>` is a row-major N x N container. The simulation uses two
//! instantiations: `Grid` for cell contents and `SatisfactionMap` for the
//! per-round classification.

use std::fmt;

use crate::core::error::{Result, SimError};
use crate::core::types::{CellState, Coord, SatisfactionState};
use crate::spatial::neighborhood::MOORE;

/// Generic square lattice with bounds-checked access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice<T: Copy + Default> {
    size: usize,
    data: Vec<T>,
}

/// Lattice of agents and vacancies
pub type Grid = Lattice<CellState>;

/// Full-grid satisfaction classification for one round
pub type SatisfactionMap = Lattice<SatisfactionState>;

/// N² without overflow
fn cell_count(size: usize) -> Result<usize> {
    size.checked_mul(size)
        .ok_or_else(|| SimError::InvalidGrid(format!("{}x{} grid is too large", size, size)))
}

impl<T: Copy + Default> Lattice<T> {
    /// Create a `size` x `size` lattice filled with `T::default()`
    pub fn new(size: usize) -> Result<Self> {
        let cells = cell_count(size)?;
        Ok(Self {
            size,
            data: vec![T::default(); cells],
        })
    }

    /// Build a lattice from row-major cells
    pub fn from_cells(size: usize, cells: Vec<T>) -> Result<Self> {
        let expected = cell_count(size)?;
        if cells.len() != expected {
            return Err(SimError::InvalidGrid(format!(
                "expected {} cells for a {}x{} grid, got {}",
                expected,
                size,
                size,
                cells.len()
            )));
        }
        Ok(Self { size, data: cells })
    }

    /// Side length N
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Validate a signed coordinate against the lattice bounds
    pub fn coord(&self, row: i64, col: i64) -> Result<Coord> {
        let in_range = |v: i64| v >= 0 && (v as u64) < self.size as u64;
        if in_range(row) && in_range(col) {
            Ok(Coord::new(row as usize, col as usize))
        } else {
            Err(SimError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    pub fn get(&self, row: i64, col: i64) -> Result<T> {
        let coord = self.coord(row, col)?;
        Ok(self.data[self.index(coord)])
    }

    pub fn set(&mut self, row: i64, col: i64, value: T) -> Result<()> {
        let coord = self.coord(row, col)?;
        let idx = self.index(coord);
        self.data[idx] = value;
        Ok(())
    }

    /// Read by an already-validated coordinate
    ///
    /// Returns `None` if the coordinate was validated against a different lattice.
    #[inline]
    pub fn at(&self, coord: Coord) -> Option<T> {
        if coord.row < self.size && coord.col < self.size {
            Some(self.data[self.index(coord)])
        } else {
            None
        }
    }

    /// Write by coordinate, with the same bounds check as `set`
    pub fn set_at(&mut self, coord: Coord, value: T) -> Result<()> {
        self.set(coord.row as i64, coord.col as i64, value)
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (Coord::new(i / size, i % size), v))
    }

    /// In-bounds Moore neighbors of `coord`
    ///
    /// Off-grid positions are skipped rather than reported as a default
    /// value, so edge cells yield 5 neighbors and corners yield 3.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = T> + '_ {
        let size = self.size as i64;
        let (row, col) = (coord.row as i64, coord.col as i64);
        MOORE.iter().filter_map(move |&(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            if r >= 0 && r < size && c >= 0 && c < size {
                Some(self.data[(r * size + c) as usize])
            } else {
                None
            }
        })
    }
}

impl<T: Copy + Default + PartialEq> Lattice<T> {
    /// Number of cells holding `value`
    pub fn count(&self, value: T) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    /// Coordinates of every cell holding `value`, row-major
    pub fn positions_of(&self, value: T) -> Vec<Coord> {
        self.cells()
            .filter(|&(_, v)| v == value)
            .map(|(c, _)| c)
            .collect()
    }
}

impl Grid {
    /// Parse a grid from text rows of `A`, `B` and `.` (or `_`)
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.iter().enumerate() {
            let parsed: Vec<CellState> = row
                .chars()
                .map(|c| {
                    CellState::from_glyph(c).ok_or_else(|| {
                        SimError::InvalidGrid(format!("unknown cell '{}' in row {}", c, r))
                    })
                })
                .collect::<Result<_>>()?;
            if parsed.len() != size {
                return Err(SimError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    parsed.len(),
                    size
                )));
            }
            cells.extend(parsed);
        }
        Self::from_cells(size, cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.size.max(1)) {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.count(CellState::Empty), 16);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(3).unwrap();
        grid.set(1, 2, CellState::TypeB).unwrap();
        assert_eq!(grid.get(1, 2).unwrap(), CellState::TypeB);
        assert_eq!(grid.at(Coord::new(1, 2)), Some(CellState::TypeB));
        assert_eq!(grid.get(2, 1).unwrap(), CellState::Empty);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(3).unwrap();
        assert!(matches!(
            grid.get(3, 0),
            Err(SimError::OutOfBounds { row: 3, col: 0, size: 3 })
        ));
        assert!(grid.get(0, -1).is_err());
        assert!(grid.set(-1, 0, CellState::TypeA).is_err());
        assert_eq!(grid.count(CellState::TypeA), 0);
        assert_eq!(grid.at(Coord::new(0, 3)), None);
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let err = Grid::from_cells(2, vec![CellState::Empty; 3]).unwrap_err();
        assert!(matches!(err, SimError::InvalidGrid(_)));
    }

    #[test]
    fn test_from_rows_and_display() {
        let grid = Grid::from_rows(&["AA.", ".B.", "A.B"]).unwrap();
        assert_eq!(grid.get(0, 1).unwrap(), CellState::TypeA);
        assert_eq!(grid.get(2, 2).unwrap(), CellState::TypeB);
        assert_eq!(grid.to_string(), "AA.\n.B.\nA.B\n");
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Grid::from_rows(&["AA", "A"]).is_err());
        assert!(Grid::from_rows(&["AX", "AA"]).is_err());
    }

    #[test]
    fn test_neighbors_skip_off_grid() {
        let grid = Grid::from_rows(&["ABA", "BAB", "ABA"]).unwrap();
        assert_eq!(grid.neighbors(Coord::new(1, 1)).count(), 8);
        assert_eq!(grid.neighbors(Coord::new(0, 1)).count(), 5);
        assert_eq!(grid.neighbors(Coord::new(0, 0)).count(), 3);
        // Center of a checkerboard sees only B orthogonally and A diagonally
        let center: Vec<_> = grid.neighbors(Coord::new(1, 1)).collect();
        assert_eq!(center.iter().filter(|&&c| c == CellState::TypeB).count(), 4);
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::from_rows(&["A.", ".B"]).unwrap();
        let coords: Vec<_> = grid.cells().map(|(c, _)| c).collect();
        assert_eq!(
            coords,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1)
            ]
        );
        assert_eq!(grid.positions_of(CellState::TypeB), vec![Coord::new(1, 1)]);
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let side = 1usize << 33;
        assert!(matches!(Grid::new(side), Err(SimError::InvalidGrid(_))));
        assert!(matches!(
            Grid::from_cells(side, Vec::new()),
            Err(SimError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_zero_size_grid() {
        let grid = Grid::new(0).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.to_string(), "");
        assert!(grid.get(0, 0).is_err());
    }
}
