//! Error types for automaton construction

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building an automaton
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// A CSV field decoded to a number that no cell state maps to
    #[error("no cell state is encoded by the number {value} (row {row}, column {column})")]
    InvalidCellValue { value: i32, row: usize, column: usize },

    #[error("grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("failed to read CSV input")]
    Csv(#[from] csv::Error),

    #[error("failed to read pattern file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AutomatonResult<T> = std::result::Result<T, AutomatonError>;
