//! FILENAME: taxonomy/src/merge.rs
//! PURPOSE: Merges definition and presentation records into the mapping table.
//! CONTEXT: This is the heart of the engine. Every code seen by either parse
//! gets exactly one merged record, grouped by report and ordered by code.
//! Consumers of the mapping artifact rely on that ordering matching display
//! order, so it is a correctness requirement, not cosmetics.

use crate::definition::DefinitionRecord;
use crate::presentation::PresentationRecord;
use crate::{KIND_ABSTRACT, KIND_GROUP};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

// ============================================================================
// MERGED RECORD
// ============================================================================

/// Display metadata of a merged record. Always present; codes with no
/// presentation record get an empty label and zero indent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiInfo {
    pub label: String,
    pub indent_level: u32,
    pub is_abstract: bool,
}

/// XBRL metadata of a merged record. Only emitted when the definition tree
/// supplied a semantic name; optional fields are omitted, never null-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XbrlInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub def_code: Option<String>,
}

/// One fused entry of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub code: String,
    pub ui: UiInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xbrl: Option<XbrlInfo>,
}

/// Result of a merge run: records grouped by report identifier (reports and
/// records both in code order), plus the number of codes skipped because no
/// report identifier could be derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    pub reports: BTreeMap<String, Vec<MergedRecord>>,
    pub skipped: usize,
}

impl MergeOutput {
    /// Total number of merged records across all reports.
    pub fn record_count(&self) -> usize {
        self.reports.values().map(Vec::len).sum()
    }
}

// ============================================================================
// MERGE
// ============================================================================

/// Fuses the two record maps over the union of their codes.
///
/// Per code, in lexicographic order:
/// - the owning report is the definition record's report, else the
///   presentation record's, else the first dot-segment of the code itself;
///   codes with none of these are counted as skipped and omitted;
/// - the UI sub-record comes from the presentation side, with the raw level
///   normalized to `max(0, level - 2)`;
/// - abstractness from the definition field-kind tag is authoritative; the
///   presentation kind is only consulted when the definition gives no
///   signal, and the final fallback is non-abstract (a policy default, not
///   verified domain truth);
/// - the xbrl sub-record is attached only when the definition record exists
///   and carries a name.
pub fn merge(
    definitions: &HashMap<String, DefinitionRecord>,
    presentations: &HashMap<String, PresentationRecord>,
) -> MergeOutput {
    let codes: BTreeSet<&String> = definitions.keys().chain(presentations.keys()).collect();

    let mut reports: BTreeMap<String, Vec<MergedRecord>> = BTreeMap::new();
    let mut skipped = 0usize;

    for code in codes {
        let def = definitions.get(code);
        let pres = presentations.get(code);

        let report = def
            .and_then(|d| d.report.clone())
            .or_else(|| pres.and_then(|p| p.report.clone()))
            .or_else(|| report_from_code(code));

        let report = match report {
            Some(report) => report,
            None => {
                log::warn!("skipping code {code:?}: no report identifier derivable");
                skipped += 1;
                continue;
            }
        };

        let is_abstract = match def.and_then(|d| d.kind.as_deref()) {
            Some(kind) => kind == KIND_ABSTRACT,
            None => pres
                .and_then(|p| p.kind.as_deref())
                .is_some_and(|kind| kind == KIND_ABSTRACT || kind == KIND_GROUP),
        };

        let ui = match pres {
            Some(p) => UiInfo {
                label: p.label.clone(),
                indent_level: p.level.saturating_sub(2),
                is_abstract,
            },
            None => UiInfo {
                label: String::new(),
                indent_level: 0,
                is_abstract,
            },
        };

        let xbrl = def.and_then(|d| {
            d.name.as_ref().map(|name| XbrlInfo {
                name: name.clone(),
                prefix: d.prefix.clone(),
                kind: d.kind.clone(),
                period_type: d.period_type.clone(),
                def_code: d.def_code.clone(),
            })
        });

        reports.entry(report).or_default().push(MergedRecord {
            code: code.clone(),
            ui,
            xbrl,
        });
    }

    // Codes were visited in sorted order, so each report's list is already
    // code-ordered; the sort keeps the guarantee independent of that detail.
    for records in reports.values_mut() {
        records.sort_by(|a, b| a.code.cmp(&b.code));
    }

    let output = MergeOutput { reports, skipped };
    log::info!(
        "merged {} records across {} reports ({} skipped)",
        output.record_count(),
        output.reports.len(),
        output.skipped
    );
    output
}

/// Derives a report identifier from the first dot-segment of a code.
fn report_from_code(code: &str) -> Option<String> {
    code.split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
