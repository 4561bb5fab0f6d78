//! FILENAME: bilancio-format/src/mapping.rs
//! PURPOSE: The merged mapping artifact (mappings.json).
//! CONTEXT: Wraps the merge engine output in a versioned document. The
//! top-level key is `mappature`, kept from the established artifact format so
//! existing consumers keep working. The mapping file is written pretty,
//! it is small and gets read by humans during taxonomy reviews.

use crate::{DocumentMetadata, FormatError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use taxonomy::{MergeOutput, MergedRecord};

/// The merged mapping artifact: metadata plus report -> ordered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub metadata: DocumentMetadata,
    pub mappature: BTreeMap<String, Vec<MergedRecord>>,
}

impl MappingDocument {
    /// Builds the artifact from a merge run. `source_files` names the input
    /// trees for provenance.
    pub fn from_merge(output: MergeOutput, source_files: Vec<String>) -> Self {
        if output.skipped > 0 {
            log::warn!(
                "{} codes had no derivable report identifier and were omitted",
                output.skipped
            );
        }
        Self {
            metadata: DocumentMetadata::with_sources(
                "XBRL mappings for Italian GAAP financial statements (Principi Contabili Italiani)",
                source_files,
            ),
            mappature: output.reports,
        }
    }
}

pub fn save_mapping(doc: &MappingDocument, path: &Path) -> Result<(), FormatError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), doc)?;
    log::info!("wrote mapping artifact to {}", path.display());
    Ok(())
}

pub fn load_mapping(path: &Path) -> Result<MappingDocument, FormatError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Loads a mapping artifact as raw JSON. The consistency checker uses this
/// so it can read legacy artifacts whose record shape predates
/// `MappingDocument` (see `CheckerConfig`).
pub fn load_mapping_value(path: &Path) -> Result<Value, FormatError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
