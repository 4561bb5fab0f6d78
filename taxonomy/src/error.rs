//! FILENAME: taxonomy/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxonomyError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An attribute is present but its value cannot be interpreted
    /// (e.g. a non-numeric `level` on a presentation node).
    #[error("invalid attribute {attribute}={value:?} on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
}
