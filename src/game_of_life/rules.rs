//! Game of Life transition rule

use super::cell::CellState;
use super::Grid;
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Write the generation following `current` into `next`.
    ///
    /// Only `current` is read. Both grids must have the same dimensions.
    pub fn evolve_into(current: &Grid, next: &mut Grid) {
        assert_eq!(
            (current.rows(), current.columns()),
            (next.rows(), next.columns()),
            "grids must have identical dimensions"
        );

        let columns = current.columns();
        if columns == 0 {
            return;
        }

        // Rows are independent, compute them in parallel
        next.cells_mut()
            .par_chunks_mut(columns)
            .enumerate()
            .for_each(|(row, cells)| {
                for (column, cell) in cells.iter_mut().enumerate() {
                    let neighbors = current.count_neighbors(row, column);
                    *cell = Self::next_state(current.get(row, column), neighbors);
                }
            });
    }

    /// Evolve the grid one generation forward into a freshly allocated grid
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = Grid::new(current.rows(), current.columns());
        Self::evolve_into(current, &mut next);
        next
    }

    /// State of a cell in the next generation given its current state and neighbor count
    pub fn next_state(current: CellState, neighbor_count: u8) -> CellState {
        match (current, neighbor_count) {
            (CellState::Alive, 2) | (_, 3) => CellState::Alive, // Survive or birth
            _ => CellState::Dead,
        }
    }
}
