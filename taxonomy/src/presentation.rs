//! FILENAME: taxonomy/src/presentation.rs
//! PURPOSE: Parses the presentation tree (dimension.xml) into per-code records.
//! CONTEXT: The presentation tree carries the display side of the metadata:
//! `<report>` containers hold `<dimension>` elements whose `<child>` nodes
//! nest indefinitely. A record is captured at every child that declares a
//! code, at any depth; traversal continues into children either way, so
//! codes can appear below uncoded structural nodes. The streaming walk keeps
//! arbitrarily deep taxonomies off the call stack.

use crate::definition::attr_value;
use crate::error::TaxonomyError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

/// Display metadata for one cell code, from the presentation tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PresentationRecord {
    /// Short display label.
    pub label: String,
    /// Full hierarchical label; falls back to the short label.
    pub fullname: String,
    /// Raw tree-relative depth from the `level` attribute (0 when absent).
    /// Indent normalization happens at merge time, not here.
    pub level: u32,
    /// Presentation-kind tag: "abstract", "item" or "group".
    pub kind: Option<String>,
    /// Sibling ordering index in document order (0 when absent).
    pub order: u32,
    /// Enclosing report identifier. Always set by the parser; optional so
    /// hand-built records can exercise the merge fallbacks.
    pub report: Option<String>,
}

/// Parses the presentation tree into `{code -> PresentationRecord}`.
///
/// Only `<child>` nodes inside a `<dimension>` of a coded `<report>` are
/// considered. Malformed XML is fatal.
pub fn parse_presentation_xml<R: BufRead>(
    reader: R,
) -> Result<HashMap<String, PresentationRecord>, TaxonomyError> {
    let mut xml = Reader::from_reader(reader);

    let mut records = HashMap::new();
    let mut report_stack: Vec<Option<String>> = Vec::new();
    let mut dimension_depth = 0u32;
    let mut buf = Vec::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"report" => report_stack.push(attr_value(&e, b"code")?),
                b"dimension" => dimension_depth += 1,
                b"child" => record_child(&e, &report_stack, dimension_depth, &mut records)?,
                _ => {}
            },
            Event::Empty(e) => {
                if e.name().as_ref() == b"child" {
                    record_child(&e, &report_stack, dimension_depth, &mut records)?;
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"report" => {
                    report_stack.pop();
                }
                b"dimension" => dimension_depth = dimension_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!("parsed {} presentation records", records.len());
    Ok(records)
}

/// Captures one `<child>` node carrying a code. Uncoded children are simply
/// structural; their descendants are still visited by the event loop.
fn record_child(
    e: &BytesStart,
    report_stack: &[Option<String>],
    dimension_depth: u32,
    records: &mut HashMap<String, PresentationRecord>,
) -> Result<(), TaxonomyError> {
    if dimension_depth == 0 {
        return Ok(());
    }
    let report = match report_stack.iter().rev().find_map(|r| r.clone()) {
        Some(report) => report,
        None => return Ok(()),
    };

    let mut code = None;
    let mut fullname = None;
    let mut record = PresentationRecord {
        report: Some(report),
        ..PresentationRecord::default()
    };

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"code" => code = Some(value),
            b"name" => record.label = value,
            b"fullname" => fullname = Some(value),
            b"type" => record.kind = Some(value),
            b"level" => record.level = parse_u32(e, "level", &value)?,
            b"order" => record.order = parse_u32(e, "order", &value)?,
            _ => {}
        }
    }

    if let Some(code) = code {
        record.fullname = fullname.unwrap_or_else(|| record.label.clone());
        records.insert(code, record);
    }
    Ok(())
}

fn parse_u32(e: &BytesStart, attribute: &str, value: &str) -> Result<u32, TaxonomyError> {
    value
        .parse()
        .map_err(|_| TaxonomyError::InvalidAttribute {
            element: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> HashMap<String, PresentationRecord> {
        parse_presentation_xml(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_captures_nested_children_at_any_depth() {
        let records = parse(
            r#"<taxonomy>
                 <report code="T0001">
                   <dimension>
                     <child code="T0001.A" name="Attivo" type="abstract" level="2" order="1">
                       <child code="T0001.A.1" name="Crediti" type="item" level="3" order="1">
                         <child code="T0001.A.1.1" name="Verso soci" type="item" level="4" order="1"/>
                       </child>
                     </child>
                   </dimension>
                 </report>
               </taxonomy>"#,
        );

        assert_eq!(records.len(), 3);
        assert_eq!(records["T0001.A"].level, 2);
        assert_eq!(records["T0001.A.1.1"].level, 4);
        assert_eq!(records["T0001.A.1.1"].report.as_deref(), Some("T0001"));
    }

    #[test]
    fn test_uncoded_child_is_structural_but_descendants_are_kept() {
        let records = parse(
            r#"<taxonomy>
                 <report code="T0001">
                   <dimension>
                     <child name="Section header" level="2">
                       <child code="T0001.B.1" name="Debiti" type="item" level="3"/>
                     </child>
                   </dimension>
                 </report>
               </taxonomy>"#,
        );

        assert_eq!(records.len(), 1);
        assert!(records.contains_key("T0001.B.1"));
    }

    #[test]
    fn test_fullname_falls_back_to_label() {
        let records = parse(
            r#"<taxonomy><report code="T0001"><dimension>
                 <child code="T0001.A" name="Attivo" level="2"/>
                 <child code="T0001.B" name="Passivo" fullname="Stato patrimoniale / Passivo" level="2"/>
               </dimension></report></taxonomy>"#,
        );

        assert_eq!(records["T0001.A"].fullname, "Attivo");
        assert_eq!(
            records["T0001.B"].fullname,
            "Stato patrimoniale / Passivo"
        );
    }

    #[test]
    fn test_missing_level_and_order_default_to_zero() {
        let records = parse(
            r#"<taxonomy><report code="T0001"><dimension>
                 <child code="T0001.A" name="Attivo"/>
               </dimension></report></taxonomy>"#,
        );
        assert_eq!(records["T0001.A"].level, 0);
        assert_eq!(records["T0001.A"].order, 0);
    }

    #[test]
    fn test_child_outside_dimension_is_ignored() {
        let records = parse(
            r#"<taxonomy><report code="T0001">
                 <child code="T0001.A" name="Attivo" level="2"/>
               </report></taxonomy>"#,
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_invalid_level_is_fatal() {
        let result = parse_presentation_xml(
            r#"<taxonomy><report code="T0001"><dimension>
                 <child code="T0001.A" name="Attivo" level="deep"/>
               </dimension></report></taxonomy>"#
                .as_bytes(),
        );
        assert!(matches!(
            result,
            Err(TaxonomyError::InvalidAttribute { .. })
        ));
    }
}
