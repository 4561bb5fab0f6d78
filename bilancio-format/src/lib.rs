//! FILENAME: bilancio-format/src/lib.rs
//! Bilancio Format Module
//!
//! Versioned JSON artifacts produced by the taxonomy pipeline: the merged
//! mapping document consumed by the form renderer, and the sparse template
//! document that replaces the dense workbook. Also hosts the consistency
//! checker that diffs two mapping artifacts after an engine change.

mod diff;
mod error;
mod mapping;
mod template;

pub use diff::{compare_codes, compare_report, CheckerConfig, FlagChange, ReportDiff};
pub use error::FormatError;
pub use mapping::{load_mapping, load_mapping_value, save_mapping, MappingDocument};
pub use template::{
    convert_to_sparse, load_dense_template, load_sparse_template, save_sparse_template,
    ConversionStats, DenseTemplateDocument, SparseTemplateDocument,
};

use serde::{Deserialize, Serialize};

/// Format version written into every artifact.
pub const FORMAT_VERSION: &str = "2.0";

// ============================================================================
// DOCUMENT METADATA
// ============================================================================

/// Header block shared by all artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Layout tag; "sparse" on the template artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub version: String,
    /// RFC 3339 generation timestamp.
    pub generated: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_files: Option<Vec<String>>,
    /// Name of the dense input the sparse artifact was derived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file: Option<String>,
    /// What produced the artifact. The field name is kept from the
    /// established format, where it pointed at a generator script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_script: Option<String>,
}

impl DocumentMetadata {
    pub fn new(description: &str) -> Self {
        Self {
            format: None,
            version: FORMAT_VERSION.to_string(),
            generated: chrono::Utc::now().to_rfc3339(),
            description: description.to_string(),
            source_files: None,
            original_file: None,
            conversion_script: None,
        }
    }

    pub fn with_sources(description: &str, source_files: Vec<String>) -> Self {
        Self {
            source_files: Some(source_files),
            ..Self::new(description)
        }
    }

    pub fn sparse(description: &str) -> Self {
        Self {
            format: Some("sparse".to_string()),
            ..Self::new(description)
        }
    }
}
