//! FILENAME: sparse-grid/src/sparse.rs
//! PURPOSE: The sparse form of a template sheet and the encode/decode pair.
//! CONTEXT: Sheets are ~99% empty, so the sparse form stores only the
//! non-absent cells keyed by row then column, plus the declared dimensions
//! needed to reconstruct the dense form exactly. BTreeMap keys serialize as
//! decimal strings in JSON and keep the artifact deterministically ordered.

use crate::cell::CellValue;
use crate::error::GridError;
use crate::grid::DenseGrid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared dimensions of the original dense sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMeta {
    pub rows: u32,
    pub cols: u32,
}

/// Sparse representation of one sheet.
///
/// Invariants:
/// - a row index appears in `data` iff that row has at least one stored cell;
/// - every stored value is a concrete `CellValue`, never an absent marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseSheet {
    pub meta: SheetMeta,
    pub data: BTreeMap<u32, BTreeMap<u32, CellValue>>,
}

impl SparseSheet {
    /// Encodes a dense grid into its sparse form, row by row.
    ///
    /// Dimensions are taken from the input itself: row count is the number
    /// of rows, column count the length of the first row. A row with a
    /// different length is a contract violation and fails immediately.
    pub fn encode(grid: &DenseGrid) -> Result<Self, GridError> {
        let rows = grid.row_count();
        let cols = grid.col_count();

        let mut data = BTreeMap::new();
        for (r, row) in grid.rows.iter().enumerate() {
            if row.len() as u32 != cols {
                return Err(GridError::RaggedGrid {
                    row: r as u32,
                    expected: cols,
                    found: row.len() as u32,
                });
            }

            let mut row_data = BTreeMap::new();
            for (c, cell) in row.iter().enumerate() {
                if let Some(value) = cell {
                    row_data.insert(c as u32, value.clone());
                }
            }

            // Rows with no stored cells are omitted entirely
            if !row_data.is_empty() {
                data.insert(r as u32, row_data);
            }
        }

        let sheet = SparseSheet {
            meta: SheetMeta { rows, cols },
            data,
        };
        log::debug!(
            "encoded {rows}x{cols} grid: {} of {} cells stored",
            sheet.cell_count(),
            u64::from(rows) * u64::from(cols)
        );
        Ok(sheet)
    }

    /// Reconstructs the original dense grid.
    ///
    /// Allocates `rows x cols` absent cells and writes every stored value at
    /// its recorded position. An entry outside the declared dimensions means
    /// the artifact is corrupt and is reported, not skipped.
    pub fn decode(&self) -> Result<DenseGrid, GridError> {
        let rows = self.meta.rows as usize;
        let cols = self.meta.cols as usize;

        let mut dense: Vec<Vec<Option<CellValue>>> = vec![vec![None; cols]; rows];

        for (&r, row_data) in &self.data {
            for (&c, value) in row_data {
                if r as usize >= rows || c as usize >= cols {
                    return Err(GridError::IndexOutOfBounds {
                        row: r,
                        col: c,
                        rows: self.meta.rows,
                        cols: self.meta.cols,
                    });
                }
                dense[r as usize][c as usize] = Some(value.clone());
            }
        }

        log::debug!(
            "decoded {rows}x{cols} grid from {} stored cells",
            self.cell_count()
        );
        Ok(DenseGrid::from_rows(dense))
    }

    /// Number of stored (non-absent) cells.
    pub fn cell_count(&self) -> u64 {
        self.data.values().map(|row| row.len() as u64).sum()
    }
}
