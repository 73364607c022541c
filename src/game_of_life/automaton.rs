//! Double-buffered Game of Life automaton
//!
//! The automaton keeps two grids. The published ("current") grid sits behind
//! a [`Mutex`] and is the only one readers ever see. `advance` computes the
//! following generation into the scratch ("next") grid without holding that
//! lock, then swaps the two handles under it. Readers therefore observe either
//! the old generation or the new one, never a mix.

use super::cell::CellState;
use super::error::{AutomatonError, AutomatonResult};
use super::io;
use super::rules::GameOfLifeRules;
use super::Grid;
use crate::concurrent::Mutex;
use itertools::iproduct;
use rand::Rng;
use std::io::Read;
use std::sync::Arc;

/// One cell handed to a [`SteppingCellularAutomaton::with_cell_data`] visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellData<S> {
    pub row: usize,
    pub column: usize,
    pub state: S,
}

/// A fixed-size automaton that advances one generation at a time
pub trait SteppingCellularAutomaton: Send + Sync {
    type State: Copy;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    /// Visit every cell of the published generation in row-major order.
    ///
    /// The visitor runs while the publish lock is held and must not call back
    /// into the automaton.
    fn with_cell_data(&self, visit: impl FnMut(CellData<Self::State>));

    /// Compute and publish the next generation
    fn advance(&self);

    /// Replace the published generation with a random one
    fn randomize<R: Rng + ?Sized>(&self, rng: &mut R);
}

/// Conway's Game of Life on a bounded grid
#[derive(Debug)]
pub struct GameOfLifeAutomaton {
    rows: usize,
    columns: usize,
    current: Mutex<Arc<Grid>>,
    // Owned by whichever `advance` call is running
    next: parking_lot::Mutex<Arc<Grid>>,
}

impl GameOfLifeAutomaton {
    fn with_grid(grid: Grid) -> Self {
        let rows = grid.rows();
        let columns = grid.columns();
        Self {
            rows,
            columns,
            current: Mutex::new(Arc::new(grid)),
            next: parking_lot::Mutex::new(Arc::new(Grid::new(rows, columns))),
        }
    }

    /// Create an automaton whose cells are alive or dead with equal probability.
    ///
    /// Fails if either dimension is zero.
    pub fn random<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> AutomatonResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(AutomatonError::InvalidDimensions { rows, columns });
        }
        Ok(Self::with_grid(Grid::random(rows, columns, rng)))
    }

    /// Create an automaton from a CSV pattern.
    ///
    /// See [`io::parse_grid`] for how the pattern is fitted to `rows` x
    /// `columns`. Fails if any field holds a number that is not a cell state.
    pub fn from_reader<R: Read>(rows: usize, columns: usize, reader: R) -> AutomatonResult<Self> {
        io::parse_grid(rows, columns, reader).map(Self::with_grid)
    }

    /// Create an automaton from an existing grid
    pub fn from_grid(grid: Grid) -> Self {
        Self::with_grid(grid)
    }

    /// Shared handle to the published generation.
    ///
    /// The handle stays valid after later generations are published; holding
    /// it only costs `advance` an extra copy of the scratch grid.
    pub fn snapshot(&self) -> Arc<Grid> {
        self.current.with_lock(|grid| Arc::clone(grid))
    }

    /// Number of living cells in the published generation
    pub fn living_count(&self) -> usize {
        self.snapshot().living_count()
    }
}

impl SteppingCellularAutomaton for GameOfLifeAutomaton {
    type State = CellState;

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn with_cell_data(&self, mut visit: impl FnMut(CellData<CellState>)) {
        self.current.with_lock(|grid| {
            for (row, column) in iproduct!(0..grid.rows(), 0..grid.columns()) {
                visit(CellData {
                    row,
                    column,
                    state: grid.get(row, column),
                });
            }
        });
    }

    fn advance(&self) {
        let mut next = self.next.lock();
        let current = self.snapshot();

        GameOfLifeRules::evolve_into(&current, Arc::make_mut(&mut next));
        drop(current);

        self.current.with_lock(|published| std::mem::swap(published, &mut *next));
    }

    fn randomize<R: Rng + ?Sized>(&self, rng: &mut R) {
        let grid = Arc::new(Grid::random(self.rows, self.columns, rng));
        self.current.with_lock(|published| *published = grid);
    }
}
