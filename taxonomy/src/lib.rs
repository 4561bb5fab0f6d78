//! FILENAME: taxonomy/src/lib.rs
//! PURPOSE: Main library entry point for the taxonomy mapping engine.
//! CONTEXT: Statutory report templates are described by two independently
//! maintained XML trees: the definition tree (machine-readable XBRL field
//! semantics) and the presentation tree (display labels and hierarchy).
//! Both key their entries by the same dot-segmented cell code. This crate
//! parses each tree into flat records and merges them into one normalized
//! per-report mapping table.

pub mod definition;
pub mod error;
pub mod merge;
pub mod presentation;

// Re-export commonly used types at the crate root
pub use definition::{parse_definition_xml, DefinitionRecord};
pub use error::TaxonomyError;
pub use merge::{merge, MergeOutput, MergedRecord, UiInfo, XbrlInfo};
pub use presentation::{parse_presentation_xml, PresentationRecord};

/// Field-kind tag marking a header cell with no data entry.
pub const KIND_ABSTRACT: &str = "abstract";

/// Presentation-kind tag marking a grouping node, rendered like a header.
pub const KIND_GROUP: &str = "group";
