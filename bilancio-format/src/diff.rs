//! FILENAME: bilancio-format/src/diff.rs
//! PURPOSE: Consistency checker comparing two mapping artifacts.
//! CONTEXT: After a merge-engine change, the new artifact is diffed against
//! the previous one instead of re-deriving expected output by hand. The
//! checker works on raw JSON because the two sides may not share a record
//! shape: legacy artifacts key records by `codice_excel` where current ones
//! use `code`. Findings are diagnostic only, never errors.

use crate::FormatError;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// ============================================================================
// CONFIG
// ============================================================================

/// Per-input record key names. The defaults match the one real migration:
/// legacy artifact on the old side, current artifact on the new side.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub old_code_key: String,
    pub new_code_key: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            old_code_key: "codice_excel".to_string(),
            new_code_key: "code".to_string(),
        }
    }
}

// ============================================================================
// REPORT DIFF
// ============================================================================

/// One abstractness flag divergence, with the newer side's field kind for
/// context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagChange {
    pub code: String,
    pub old_is_abstract: Option<bool>,
    pub new_is_abstract: Option<bool>,
    /// `xbrl.type` from the newer artifact, when present.
    pub xbrl_type: Option<String>,
}

/// Outcome of comparing one report's records across two artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportDiff {
    pub report: String,
    /// Codes only in the newer artifact.
    pub additions: Vec<String>,
    /// Codes only in the older artifact.
    pub removals: Vec<String>,
    /// Codes in both whose abstractness flag differs.
    pub changes: Vec<FlagChange>,
    /// Codes in both with an unchanged flag.
    pub unchanged: usize,
    /// Selected codes found in neither artifact (only set by `compare_codes`).
    pub missing: Vec<String>,
}

impl fmt::Display for ReportDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Report {}: +{} added, -{} removed, {} flag changes, {} unchanged",
            self.report,
            self.additions.len(),
            self.removals.len(),
            self.changes.len(),
            self.unchanged
        )?;
        for change in &self.changes {
            writeln!(
                f,
                "  {}: is_abstract {:?} -> {:?} (type: {})",
                change.code,
                change.old_is_abstract,
                change.new_is_abstract,
                change.xbrl_type.as_deref().unwrap_or("n/a")
            )?;
        }
        for code in &self.missing {
            writeln!(f, "  {code}: not found in either artifact")?;
        }
        Ok(())
    }
}

// ============================================================================
// COMPARISON
// ============================================================================

/// Compares every code of `report` across two mapping documents.
pub fn compare_report(
    old_doc: &Value,
    new_doc: &Value,
    report: &str,
    config: &CheckerConfig,
) -> Result<ReportDiff, FormatError> {
    let old = index_report(old_doc, report, &config.old_code_key);
    let new = index_report(new_doc, report, &config.new_code_key);
    if old.is_empty() && new.is_empty() {
        return Err(FormatError::ReportNotFound(report.to_string()));
    }

    let codes: BTreeSet<&String> = old.keys().chain(new.keys()).collect();
    Ok(diff_codes(report, codes.into_iter(), &old, &new))
}

/// Compares only the given codes of `report`, in the order given by their
/// sorted form. Codes absent from both sides end up in `missing`.
pub fn compare_codes(
    old_doc: &Value,
    new_doc: &Value,
    report: &str,
    codes: &[String],
    config: &CheckerConfig,
) -> Result<ReportDiff, FormatError> {
    let old = index_report(old_doc, report, &config.old_code_key);
    let new = index_report(new_doc, report, &config.new_code_key);
    if old.is_empty() && new.is_empty() {
        return Err(FormatError::ReportNotFound(report.to_string()));
    }

    let selected: BTreeSet<&String> = codes.iter().collect();
    Ok(diff_codes(report, selected.into_iter(), &old, &new))
}

fn diff_codes<'a>(
    report: &str,
    codes: impl Iterator<Item = &'a String>,
    old: &HashMap<String, &Value>,
    new: &HashMap<String, &Value>,
) -> ReportDiff {
    let mut diff = ReportDiff {
        report: report.to_string(),
        ..ReportDiff::default()
    };

    for code in codes {
        match (old.get(code), new.get(code)) {
            (None, None) => diff.missing.push(code.clone()),
            (None, Some(_)) => diff.additions.push(code.clone()),
            (Some(_), None) => diff.removals.push(code.clone()),
            (Some(old_entry), Some(new_entry)) => {
                let old_flag = is_abstract(old_entry);
                let new_flag = is_abstract(new_entry);
                if old_flag == new_flag {
                    diff.unchanged += 1;
                } else {
                    diff.changes.push(FlagChange {
                        code: code.clone(),
                        old_is_abstract: old_flag,
                        new_is_abstract: new_flag,
                        xbrl_type: xbrl_type(new_entry),
                    });
                }
            }
        }
    }

    diff
}

/// Indexes one report's entry array by its code key. A report or `mappature`
/// block missing from a document indexes as empty.
fn index_report<'a>(doc: &'a Value, report: &str, code_key: &str) -> HashMap<String, &'a Value> {
    doc.get("mappature")
        .and_then(|m| m.get(report))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .get(code_key)
                        .and_then(Value::as_str)
                        .map(|code| (code.to_string(), entry))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn is_abstract(entry: &Value) -> Option<bool> {
    entry.get("ui")?.get("is_abstract")?.as_bool()
}

fn xbrl_type(entry: &Value) -> Option<String> {
    entry
        .get("xbrl")?
        .get("type")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn old_doc() -> Value {
        json!({
            "mappature": {
                "T0006": [
                    {"codice_excel": "T0006.A.1", "ui": {"is_abstract": true}},
                    {"codice_excel": "T0006.A.2", "ui": {"is_abstract": false}},
                    {"codice_excel": "T0006.A.3", "ui": {"is_abstract": false}}
                ]
            }
        })
    }

    fn new_doc() -> Value {
        json!({
            "mappature": {
                "T0006": [
                    {"code": "T0006.A.1", "ui": {"is_abstract": false},
                     "xbrl": {"name": "X", "type": "monetary"}},
                    {"code": "T0006.A.2", "ui": {"is_abstract": false}},
                    {"code": "T0006.A.4", "ui": {"is_abstract": true}}
                ]
            }
        })
    }

    #[test]
    fn test_classifies_additions_removals_and_changes() {
        let diff = compare_report(
            &old_doc(),
            &new_doc(),
            "T0006",
            &CheckerConfig::default(),
        )
        .unwrap();

        assert_eq!(diff.additions, vec!["T0006.A.4"]);
        assert_eq!(diff.removals, vec!["T0006.A.3"]);
        assert_eq!(diff.unchanged, 1);

        assert_eq!(diff.changes.len(), 1);
        let change = &diff.changes[0];
        assert_eq!(change.code, "T0006.A.1");
        assert_eq!(change.old_is_abstract, Some(true));
        assert_eq!(change.new_is_abstract, Some(false));
        assert_eq!(change.xbrl_type.as_deref(), Some("monetary"));
    }

    #[test]
    fn test_compare_codes_reports_missing_selection() {
        let codes = vec!["T0006.A.1".to_string(), "T0006.Z.9".to_string()];
        let diff = compare_codes(
            &old_doc(),
            &new_doc(),
            "T0006",
            &codes,
            &CheckerConfig::default(),
        )
        .unwrap();

        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.missing, vec!["T0006.Z.9"]);
        assert!(diff.additions.is_empty());
    }

    #[test]
    fn test_unknown_report_is_an_error() {
        let result = compare_report(
            &old_doc(),
            &new_doc(),
            "T9999",
            &CheckerConfig::default(),
        );
        assert!(matches!(result, Err(FormatError::ReportNotFound(_))));
    }

    #[test]
    fn test_same_key_on_both_sides() {
        let config = CheckerConfig {
            old_code_key: "code".to_string(),
            new_code_key: "code".to_string(),
        };
        let diff = compare_report(&new_doc(), &new_doc(), "T0006", &config).unwrap();
        assert!(diff.changes.is_empty());
        assert_eq!(diff.unchanged, 3);
    }

    #[test]
    fn test_display_summary() {
        let diff = compare_report(
            &old_doc(),
            &new_doc(),
            "T0006",
            &CheckerConfig::default(),
        )
        .unwrap();
        let text = diff.to_string();
        assert!(text.contains("Report T0006"));
        assert!(text.contains("+1 added"));
        assert!(text.contains("T0006.A.1"));
    }
}
