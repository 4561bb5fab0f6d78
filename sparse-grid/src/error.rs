//! FILENAME: sparse-grid/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Dense input row has a different length than the first row. Ragged
    /// input is a caller bug; the codec refuses to guess a column count.
    #[error("ragged grid: row {row} has {found} columns, expected {expected}")]
    RaggedGrid {
        row: u32,
        expected: u32,
        found: u32,
    },

    /// A sparse entry addresses a cell outside the declared dimensions.
    /// This means the sparse artifact is corrupt; the value is never
    /// clamped or dropped.
    #[error("sparse entry ({row}, {col}) outside declared dimensions {rows}x{cols}")]
    IndexOutOfBounds {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
}
