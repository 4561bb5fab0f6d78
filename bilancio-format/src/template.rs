//! FILENAME: bilancio-format/src/template.rs
//! PURPOSE: Dense and sparse template documents and the conversion between them.
//! CONTEXT: The dense template workbook stores every sheet as a full 2D
//! array and runs to tens of megabytes at ~99% null cells. The sparse
//! artifact keeps the same `config`/`index` blocks untouched and re-encodes
//! each sheet through the sparse-grid codec. The sparse file is written
//! compact; nobody reads it by hand.

use crate::{DocumentMetadata, FormatError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sparse_grid::{DenseGrid, SparseSheet};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// ============================================================================
// DOCUMENTS
// ============================================================================

/// The dense template workbook as shipped: one rectangular grid per report,
/// plus opaque `config`/`index` blocks passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseTemplateDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    pub sheets: BTreeMap<String, DenseGrid>,
}

/// The sparse template artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseTemplateDocument {
    pub metadata: DocumentMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    pub sheets: BTreeMap<String, SparseSheet>,
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Aggregate statistics of one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionStats {
    pub sheets: usize,
    pub total_cells: u64,
    pub stored_cells: u64,
}

impl ConversionStats {
    /// Fraction of cells that were absent, in [0, 1].
    pub fn sparsity(&self) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        1.0 - (self.stored_cells as f64 / self.total_cells as f64)
    }
}

/// Re-encodes every sheet of a dense template into sparse form.
///
/// Consumes the dense document so the full workbook is never held twice;
/// each sheet is encoded and dropped before the next is touched. A ragged
/// sheet aborts the whole conversion (the error names the offending row).
pub fn convert_to_sparse(
    dense: DenseTemplateDocument,
) -> Result<(SparseTemplateDocument, ConversionStats), FormatError> {
    let mut sheets = BTreeMap::new();
    let mut stats = ConversionStats::default();

    for (name, grid) in dense.sheets {
        let sparse = SparseSheet::encode(&grid)?;
        stats.sheets += 1;
        stats.total_cells += u64::from(grid.row_count()) * u64::from(grid.col_count());
        stats.stored_cells += sparse.cell_count();
        sheets.insert(name, sparse);
    }

    log::info!(
        "converted {} sheets: {} of {} cells stored ({:.1}% sparse)",
        stats.sheets,
        stats.stored_cells,
        stats.total_cells,
        stats.sparsity() * 100.0
    );

    let metadata = DocumentMetadata {
        original_file: Some("workbookabb.json (dense format)".to_string()),
        conversion_script: Some("bilancio-format::convert_to_sparse".to_string()),
        ..DocumentMetadata::sparse("Sparse format template - only non-null cells stored")
    };

    let doc = SparseTemplateDocument {
        metadata,
        config: dense.config,
        index: dense.index,
        sheets,
    };
    Ok((doc, stats))
}

// ============================================================================
// FILE IO
// ============================================================================

pub fn load_dense_template(path: &Path) -> Result<DenseTemplateDocument, FormatError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn load_sparse_template(path: &Path) -> Result<SparseTemplateDocument, FormatError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn save_sparse_template(doc: &SparseTemplateDocument, path: &Path) -> Result<(), FormatError> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), doc)?;
    log::info!("wrote sparse template to {}", path.display());
    Ok(())
}
