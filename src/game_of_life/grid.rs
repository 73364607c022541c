//! Grid representation and utilities for Game of Life

use super::cell::CellState;
use super::error::{AutomatonError, AutomatonResult};
use anyhow::Result;
use rand::Rng;
use std::fmt;

/// Fixed-size grid of cell states stored in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid where every cell is dead
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![CellState::Dead; rows * columns],
        }
    }

    /// Create a grid where every cell is alive or dead with equal probability
    pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let cells = (0..rows * columns).map(|_| CellState::random(rng)).collect();
        Self { rows, columns, cells }
    }

    /// Create a grid from a list of equally long rows
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> AutomatonResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(AutomatonError::InvalidDimensions {
                rows: height,
                columns: width,
            });
        }

        Ok(Self {
            rows: height,
            columns: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Get cell state at coordinates
    pub fn get(&self, row: usize, column: usize) -> CellState {
        if row < self.rows && column < self.columns {
            self.cells[self.index(row, column)]
        } else {
            CellState::Dead // Out of bounds cells are considered dead
        }
    }

    /// Set cell state at coordinates
    pub fn set(&mut self, row: usize, column: usize, state: CellState) -> Result<()> {
        if row >= self.rows || column >= self.columns {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} grid",
                row,
                column,
                self.rows,
                self.columns
            );
        }
        let idx = self.index(row, column);
        self.cells[idx] = state;
        Ok(())
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> &[CellState] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// Count living neighbors of a cell. Positions outside the grid are dead.
    pub fn count_neighbors(&self, row: usize, column: usize) -> u8 {
        let mut count = 0;

        for dr in [-1, 0, 1] {
            for dc in [-1, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue; // Skip the cell itself
                }

                if self.is_neighbor_alive(row as isize + dr, column as isize + dc) {
                    count += 1;
                }
            }
        }

        count
    }

    fn is_neighbor_alive(&self, row: isize, column: isize) -> bool {
        row >= 0
            && column >= 0
            && (row as usize) < self.rows
            && (column as usize) < self.columns
            && self.cells[self.index(row as usize, column as usize)].is_alive()
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| (idx / self.columns, idx % self.columns))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for &cell in self.row(row) {
                write!(f, "{}", if cell.is_alive() { '1' } else { '0' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn grid_from_bits(bits: &[&[u8]]) -> Grid {
    let rows = bits
        .iter()
        .map(|row| row.iter().map(|&b| CellState::from(b == 1)).collect())
        .collect();
    Grid::from_rows(rows).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 4);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = grid_from_bits(&[&[1, 0, 1], &[0, 1, 0], &[1, 0, 1]]);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.living_count(), 5);
        assert_eq!(grid.living_cells()[1], (0, 2));
    }

    #[test]
    fn test_grid_from_ragged_rows_fails() {
        let rows = vec![vec![CellState::Dead; 3], vec![CellState::Dead; 2]];
        assert!(matches!(
            Grid::from_rows(rows),
            Err(AutomatonError::InvalidDimensions { .. })
        ));
        assert!(Grid::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(2, 2);
        assert!(grid.set(1, 1, CellState::Alive).is_ok());
        assert!(grid.set(2, 0, CellState::Alive).is_err());
        assert_eq!(grid.get(1, 1), CellState::Alive);
        assert_eq!(grid.get(5, 5), CellState::Dead);
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = grid_from_bits(&[&[1, 1, 1], &[1, 0, 1], &[1, 1, 1]]);

        // Center cell should have 8 neighbors
        assert_eq!(grid.count_neighbors(1, 1), 8);

        // Corner only sees its in-bounds neighbors
        assert_eq!(grid.count_neighbors(0, 0), 2);
    }

    #[test]
    fn test_no_wraparound() {
        let grid = grid_from_bits(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 1]]);

        // (2, 2) would be a neighbor of (0, 0) on a torus
        assert_eq!(grid.count_neighbors(0, 0), 0);
        assert_eq!(grid.count_neighbors(1, 1), 1);
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = Grid::random(8, 8, &mut StdRng::seed_from_u64(3));
        let b = Grid::random(8, 8, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_eq!(a.row(0).len(), 8);
    }

    #[test]
    fn test_display() {
        let grid = grid_from_bits(&[&[1, 0], &[0, 1]]);
        assert_eq!(grid.to_string(), "10\n01\n");
    }
}
