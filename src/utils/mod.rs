//! Utility modules

pub mod display;

pub use display::{CellStyle, Color, ColorOutput, FrameFormatter, GameOfLifeStyle};
