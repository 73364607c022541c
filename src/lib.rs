//! Conway's Game of Life automaton
//!
//! A double-buffered Game of Life grid that can be stepped from one thread
//! while another thread reads consistent generations from it, together with
//! CSV pattern loading and a headless terminal driver.

pub mod concurrent;
pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{
    AutomatonError, CellData, CellState, GameOfLifeAutomaton, SteppingCellularAutomaton,
};
pub use simulation::Simulation;
