//! FILENAME: taxonomy/src/definition.rs
//! PURPOSE: Parses the definition tree (mapping.xml) into per-code records.
//! CONTEXT: The definition tree carries the XBRL side of the metadata:
//! `<report code="...">` containers holding `<cell>` nodes whose attributes
//! name the taxonomy element, its type, namespace prefix, period type and an
//! optional cross-reference. Annotation is sparse: a cell without a code is
//! expected and skipped, not an error.

use crate::error::TaxonomyError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

/// XBRL metadata for one cell code, read verbatim from the definition tree.
/// Absent attributes stay `None`; they are never defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefinitionRecord {
    /// Semantic element name (e.g. "RicaviVenditePrestazioni").
    pub name: Option<String>,
    /// Field-kind tag: "monetary", "string", "abstract", ...
    pub kind: Option<String>,
    /// Namespace prefix of the element.
    pub prefix: Option<String>,
    /// Temporal classification: "instant" or "duration".
    pub period_type: Option<String>,
    /// Cross-reference to another cell code.
    pub def_code: Option<String>,
    /// Innermost enclosing report identifier. Always set by the parser;
    /// optional so hand-built records can exercise the merge fallbacks.
    pub report: Option<String>,
}

/// Parses the definition tree into `{code -> DefinitionRecord}`.
///
/// Report containers may nest; a cell is tagged with the innermost enclosing
/// report that carries a code. Cells outside any coded report container are
/// dropped. Malformed XML is fatal.
pub fn parse_definition_xml<R: BufRead>(
    reader: R,
) -> Result<HashMap<String, DefinitionRecord>, TaxonomyError> {
    let mut xml = Reader::from_reader(reader);

    let mut records = HashMap::new();
    // One entry per open <report>, coded or not, so End events pop cleanly.
    let mut report_stack: Vec<Option<String>> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"report" => report_stack.push(attr_value(&e, b"code")?),
                b"cell" => record_cell(&e, &report_stack, &mut records)?,
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"cell" {
                    record_cell(&e, &report_stack, &mut records)?;
                }
            }
            Event::End(e) => {
                if e.name().as_ref() == b"report" {
                    report_stack.pop();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("parsed {} definition records", records.len());
    Ok(records)
}

/// Captures one `<cell>` node. Cells without a code attribute or without an
/// enclosing coded report are skipped.
fn record_cell(
    e: &BytesStart,
    report_stack: &[Option<String>],
    records: &mut HashMap<String, DefinitionRecord>,
) -> Result<(), TaxonomyError> {
    let report = match report_stack.iter().rev().find_map(|r| r.clone()) {
        Some(report) => report,
        None => return Ok(()),
    };

    let mut code = None;
    let mut record = DefinitionRecord {
        report: Some(report),
        ..DefinitionRecord::default()
    };

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"code" => code = Some(value),
            b"xbrl:name" => record.name = Some(value),
            b"xbrl:type" => record.kind = Some(value),
            b"xbrl:prefix" => record.prefix = Some(value),
            b"xbrl:periodType" => record.period_type = Some(value),
            b"def_code" => record.def_code = Some(value),
            _ => {}
        }
    }

    if let Some(code) = code {
        records.insert(code, record);
    }
    Ok(())
}

/// Returns the unescaped value of a single attribute, if present.
pub(crate) fn attr_value(e: &BytesStart, key: &[u8]) -> Result<Option<String>, TaxonomyError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
