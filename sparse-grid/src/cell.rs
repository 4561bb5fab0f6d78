//! FILENAME: sparse-grid/src/cell.rs
//! PURPOSE: Defines the value stored in a single template cell.
//! CONTEXT: Template grids come from JSON, so a cell is either absent (null)
//! or one of the JSON scalar types. Absence is modelled as `Option::None` at
//! the grid level; `CellValue` itself is always a concrete value, which is
//! what lets the sparse form guarantee it never stores an absent marker.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A concrete (non-absent) cell value.
///
/// Numbers keep the `serde_json::Number` representation rather than being
/// widened to `f64`, so `5` and `5.0` survive a round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(Number),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    pub fn new_text(text: String) -> Self {
        CellValue::Text(text)
    }

    pub fn new_boolean(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}
