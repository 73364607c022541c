//! Game of Life core functionality

pub mod automaton;
pub mod cell;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use automaton::{CellData, GameOfLifeAutomaton, SteppingCellularAutomaton};
pub use cell::CellState;
pub use error::{AutomatonError, AutomatonResult};
pub use grid::Grid;
pub use io::{create_example_patterns, load_grid_from_file, parse_grid};
pub use rules::GameOfLifeRules;
