//! Loading grids from CSV patterns

use super::cell::CellState;
use super::error::{AutomatonError, AutomatonResult};
use super::Grid;
use crate::config::InputEncoding;
use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

/// Parse a CSV pattern into a grid of exactly `rows` x `columns` cells.
///
/// One record per grid row, comma separated, no header. Missing fields and
/// missing records are filled with dead cells. Fields and records past the
/// grid bounds are decoded (so invalid values still fail) and then dropped.
pub fn parse_grid<R: Read>(rows: usize, columns: usize, reader: R) -> AutomatonResult<Grid> {
    if rows == 0 || columns == 0 {
        return Err(AutomatonError::InvalidDimensions { rows, columns });
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut grid = Grid::new(rows, columns);
    let mut record_count = 0;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        record_count += 1;

        for (column, field) in record.iter().enumerate() {
            let state = CellState::from_csv_field(field)
                .map_err(|value| AutomatonError::InvalidCellValue { value, row, column })?;

            if row < rows && column < columns {
                let idx = grid.index(row, column);
                grid.cells_mut()[idx] = state;
            }
        }

        if record.len() > columns {
            log::debug!(
                "Truncating row {} from {} to {} fields",
                row,
                record.len(),
                columns
            );
        }
    }

    if record_count > rows {
        log::debug!("Ignoring {} rows past row {}", record_count - rows, rows);
    } else if record_count < rows {
        log::debug!("Padding {} missing rows with dead cells", rows - record_count);
    }

    Ok(grid)
}

/// Load a grid from a pattern file written in `encoding`.
///
/// A file that does not exist yields an all-dead grid.
pub fn load_grid_from_file<P: AsRef<Path>>(
    path: P,
    rows: usize,
    columns: usize,
    encoding: InputEncoding,
) -> AutomatonResult<Grid> {
    let path = path.as_ref();

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::warn!(
                "Pattern file {} not found, starting with an empty grid",
                path.display()
            );
            Vec::new()
        }
        Err(source) => {
            return Err(AutomatonError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let text = decode_text(&bytes, encoding).map_err(|source| AutomatonError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "Loading {}x{} grid from {} ({:?})",
        rows,
        columns,
        path.display(),
        encoding
    );
    parse_grid(rows, columns, text.as_bytes())
}

/// Decode raw file contents, dropping a leading byte-order mark
pub fn decode_text(bytes: &[u8], encoding: InputEncoding) -> io::Result<String> {
    match encoding {
        InputEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
            String::from_utf8(bytes.to_vec())
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
        }
        InputEncoding::Utf16Le => {
            if bytes.len() % 2 != 0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "UTF-16LE input has an odd number of bytes",
                ));
            }
            let units = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
            let text = char::decode_utf16(units)
                .collect::<Result<String, _>>()
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
            if let Some(stripped) = text.strip_prefix('\u{FEFF}') {
                return Ok(stripped.to_owned());
            }
            Ok(text)
        }
    }
}

/// Encode text for writing a pattern file
pub fn encode_text(text: &str, encoding: InputEncoding) -> Vec<u8> {
    match encoding {
        InputEncoding::Utf8 => text.as_bytes().to_vec(),
        InputEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
    }
}

/// Create example pattern files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P, encoding: InputEncoding) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        // Glider pattern
        ("glider.csv", "0,0,1\n1,0,1\n0,1,1\n"),
        // Blinker pattern (oscillator)
        ("blinker.csv", "0,0,0\n1,1,1\n0,0,0\n"),
        // Block pattern (still life), short rows are padded
        ("block.csv", "0\n0,1,1\n0,1,1\n"),
        // Beacon pattern (oscillator)
        ("beacon.csv", "1,1\n1,1\n0,0,1,1\n0,0,1,1\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), encode_text(content, encoding))
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::grid::grid_from_bits;
    use tempfile::tempdir;

    #[test]
    fn test_parse_diagonal() {
        let grid = parse_grid(2, 2, "1,0\n0,1".as_bytes()).unwrap();
        assert_eq!(grid.row(0), &[CellState::Alive, CellState::Dead]);
        assert_eq!(grid.row(1), &[CellState::Dead, CellState::Alive]);
    }

    #[test]
    fn test_missing_rows_are_padded() {
        let grid = parse_grid(3, 2, "1,1\n".as_bytes()).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid, grid_from_bits(&[&[1, 1], &[0, 0], &[0, 0]]));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let grid = parse_grid(2, 4, "1\n0,1,,x\n".as_bytes()).unwrap();
        assert_eq!(grid, grid_from_bits(&[&[1, 0, 0, 0], &[0, 1, 0, 0]]));
    }

    #[test]
    fn test_oversized_input_is_truncated() {
        let grid = parse_grid(2, 2, "1,1,1\n1,1,1\n1,1,1\n".as_bytes()).unwrap();
        assert_eq!(grid, grid_from_bits(&[&[1, 1], &[1, 1]]));
    }

    #[test]
    fn test_invalid_value() {
        let err = parse_grid(2, 2, "1,0\n0,7\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            AutomatonError::InvalidCellValue { value: 7, row: 1, column: 1 }
        ));
        assert!(err.to_string().contains('7'));

        // Also rejected outside the grid bounds
        assert!(parse_grid(1, 1, "0,2\n".as_bytes()).is_err());
    }

    #[test]
    fn test_quoted_fields() {
        let grid = parse_grid(1, 3, "\"1\",\"0\",\"1\"\n".as_bytes()).unwrap();
        assert_eq!(grid, grid_from_bits(&[&[1, 0, 1]]));
    }

    #[test]
    fn test_empty_input() {
        let grid = parse_grid(2, 3, io::empty()).unwrap();
        assert!(grid.is_empty());
        assert_eq!((grid.rows(), grid.columns()), (2, 3));
    }

    #[test]
    fn test_zero_dimensions() {
        assert!(matches!(
            parse_grid(0, 3, io::empty()),
            Err(AutomatonError::InvalidDimensions { rows: 0, columns: 3 })
        ));
    }

    #[test]
    fn test_decode_utf16le() {
        let bytes = [0xFF, 0xFE, b'1', 0, b',', 0, b'0', 0];
        assert_eq!(decode_text(&bytes, InputEncoding::Utf16Le).unwrap(), "1,0");
        assert!(decode_text(&bytes[..3], InputEncoding::Utf16Le).is_err());

        let bytes = [0xEF, 0xBB, 0xBF, b'1'];
        assert_eq!(decode_text(&bytes, InputEncoding::Utf8).unwrap(), "1");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let grid = load_grid_from_file(
            temp_dir.path().join("missing.csv"),
            4,
            5,
            InputEncoding::Utf16Le,
        )
        .unwrap();
        assert!(grid.is_empty());
        assert_eq!((grid.rows(), grid.columns()), (4, 5));
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path(), InputEncoding::Utf16Le).unwrap();

        assert!(temp_dir.path().join("glider.csv").exists());
        assert!(temp_dir.path().join("blinker.csv").exists());
        assert!(temp_dir.path().join("block.csv").exists());
        assert!(temp_dir.path().join("beacon.csv").exists());

        let glider = load_grid_from_file(
            temp_dir.path().join("glider.csv"),
            5,
            5,
            InputEncoding::Utf16Le,
        )
        .unwrap();
        assert_eq!(glider.living_count(), 5); // Glider has 5 living cells

        let block = load_grid_from_file(
            temp_dir.path().join("block.csv"),
            4,
            4,
            InputEncoding::Utf16Le,
        )
        .unwrap();
        assert_eq!(block.living_cells(), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }
}
