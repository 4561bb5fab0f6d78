//! FILENAME: bilancio-format/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid codec error: {0}")]
    Grid(#[from] sparse_grid::GridError),

    #[error("report not found in either document: {0}")]
    ReportNotFound(String),
}
