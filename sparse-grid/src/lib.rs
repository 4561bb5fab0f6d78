//! FILENAME: sparse-grid/src/lib.rs
//! PURPOSE: Main library entry point for the sparse grid codec.
//! CONTEXT: Report template sheets are rectangular 2D grids in which the
//! overwhelming majority of cells are empty. This crate converts between the
//! dense form (a 2D array with explicit nulls) and a sparse form that stores
//! only the non-empty cells, with a lossless round-trip guarantee.

pub mod cell;
pub mod error;
pub mod grid;
pub mod sparse;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use error::GridError;
pub use grid::DenseGrid;
pub use sparse::{SheetMeta, SparseSheet};
