//! FILENAME: sparse-grid/src/grid.rs
//! PURPOSE: The dense form of a template sheet.
//! CONTEXT: This is the shape the sheets have in the source template JSON:
//! a rectangular 2D array where empty cells are explicit nulls. The grid is
//! built once from input and never mutated; the codec in `sparse.rs` is the
//! only consumer.

use crate::cell::CellValue;
use serde::{Deserialize, Serialize};

/// A rectangular grid of optional cell values. `None` is the absent marker.
///
/// Rectangularity (every row the same length as the first) is a precondition
/// of the codec, checked at encode time. Row and column indices are 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DenseGrid {
    pub rows: Vec<Vec<Option<CellValue>>>,
}

impl DenseGrid {
    /// Creates an empty grid (0 rows, 0 cols).
    pub fn new() -> Self {
        DenseGrid { rows: Vec::new() }
    }

    pub fn from_rows(rows: Vec<Vec<Option<CellValue>>>) -> Self {
        DenseGrid { rows }
    }

    /// Number of rows.
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of columns, taken from the first row (0 if there are no rows).
    pub fn col_count(&self) -> u32 {
        self.rows.first().map_or(0, |row| row.len() as u32)
    }

    /// Number of non-absent cells.
    pub fn stored_cells(&self) -> u64 {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_some()).count() as u64)
            .sum()
    }
}

impl Default for DenseGrid {
    fn default() -> Self {
        Self::new()
    }
}
