//! Terminal rendering of automaton generations

use crate::config::DisplayConfig;
use crate::game_of_life::{CellState, SteppingCellularAutomaton};

/// Maps a cell state to what is drawn for it
pub trait CellStyle<S> {
    fn glyph(&self, state: S) -> char;

    fn color(&self, state: S) -> Color;
}

/// Default style for Game of Life cells: green living cells on grey
#[derive(Debug, Clone)]
pub struct GameOfLifeStyle {
    alive_glyph: char,
    dead_glyph: char,
}

impl GameOfLifeStyle {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            alive_glyph: config.alive_glyph,
            dead_glyph: config.dead_glyph,
        }
    }
}

impl Default for GameOfLifeStyle {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}

impl CellStyle<CellState> for GameOfLifeStyle {
    fn glyph(&self, state: CellState) -> char {
        match state {
            CellState::Alive => self.alive_glyph,
            CellState::Dead => self.dead_glyph,
        }
    }

    fn color(&self, state: CellState) -> Color {
        match state {
            CellState::Alive => Color::Green,
            CellState::Dead => Color::Gray,
        }
    }
}

/// Formats the published generation of an automaton for the terminal
pub struct FrameFormatter<St> {
    style: St,
    color: bool,
}

impl<St> FrameFormatter<St> {
    pub fn new(style: St, color: bool) -> Self {
        Self { style, color }
    }

    /// Format one frame, one line per grid row
    pub fn format_frame<A>(&self, automaton: &A) -> String
    where
        A: SteppingCellularAutomaton,
        St: CellStyle<A::State>,
    {
        let mut output = String::with_capacity(automaton.rows() * (automaton.columns() + 1));

        automaton.with_cell_data(|cell| {
            if cell.column == 0 && cell.row > 0 {
                output.push('\n');
            }
            self.push_cell(&mut output, cell.state);
        });
        output.push('\n');

        output
    }

    /// Format one frame with row and column numbers
    pub fn format_frame_with_coords<A>(&self, automaton: &A) -> String
    where
        A: SteppingCellularAutomaton,
        St: CellStyle<A::State>,
    {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for column in 0..automaton.columns() {
            output.push_str(&format!("{:2}", column % 10));
        }

        automaton.with_cell_data(|cell| {
            if cell.column == 0 {
                output.push_str(&format!("\n{:2} ", cell.row));
            }
            output.push(' ');
            self.push_cell(&mut output, cell.state);
        });
        output.push('\n');

        output
    }

    fn push_cell<S: Copy>(&self, output: &mut String, state: S)
    where
        St: CellStyle<S>,
    {
        let glyph = self.style.glyph(state);
        if self.color {
            output.push_str(&format!("\x1b[{}m{}\x1b[0m", self.style.color(state).code(), glyph));
        } else {
            output.push(glyph);
        }
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Blue,
    Gray,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Blue => 34,
            Color::Gray => 90,
        }
    }
}
