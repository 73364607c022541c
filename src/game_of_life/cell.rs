//! Cell states and their CSV encoding

use rand::Rng;
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,
    #[default]
    Dead,
}

impl CellState {
    /// Number a field falls back to when it cannot be parsed
    pub const DEFAULT_CSV_VALUE: i32 = 0;

    /// Every state, in declaration order
    pub const ALL: [CellState; 2] = [CellState::Alive, CellState::Dead];

    /// Integer used for this state in CSV input
    pub fn csv_value(self) -> i32 {
        match self {
            CellState::Alive => 1,
            CellState::Dead => 0,
        }
    }

    /// Look up the state encoded by `value`
    pub fn from_csv_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.csv_value() == value)
    }

    /// Parse a raw CSV field.
    ///
    /// Unparsable fields decode as [`CellState::DEFAULT_CSV_VALUE`]. On an
    /// unmapped number, the number itself is returned as the error.
    pub fn from_csv_field(field: &str) -> Result<Self, i32> {
        let value = field.parse::<i32>().unwrap_or(Self::DEFAULT_CSV_VALUE);
        Self::from_csv_value(value).ok_or(value)
    }

    /// Draw a state with equal probability for alive and dead
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellState::Alive => write!(f, "alive"),
            CellState::Dead => write!(f, "dead"),
        }
    }
}
