//! Read-only review of search tasks whose root cause was decided elsewhere.
//!
//! Records are displayed and tallied exactly as stored; nothing here runs
//! the classifier.

use crate::errors::RootCauseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One pre-classified search-task run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTaskRecord {
    pub id: String,
    /// What the agent was asked to find
    pub task: String,
    pub agent: String,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failed runs per recorded root cause, in name order. Causes that differ
    /// only in ASCII case are one cause, keyed by the first spelling seen.
    /// Failures without a recorded cause are counted under "Unclassified".
    pub by_root_cause: BTreeMap<String, usize>,
}

pub const UNCLASSIFIED: &str = "Unclassified";

/// Parses a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<SearchTaskRecord>, RootCauseError> {
    serde_json::from_str(json).map_err(|e| RootCauseError::InvalidDocument(e.to_string()))
}

pub fn summarize(records: &[SearchTaskRecord]) -> ReviewSummary {
    let mut summary = ReviewSummary {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        if record.succeeded {
            summary.succeeded += 1;
            continue;
        }
        summary.failed += 1;
        let cause = record
            .root_cause
            .as_deref()
            .map(str::trim)
            .filter(|cause| !cause.is_empty())
            .unwrap_or(UNCLASSIFIED);
        let key = summary
            .by_root_cause
            .keys()
            .find(|seen| same_cause(seen, cause))
            .cloned()
            .unwrap_or_else(|| cause.to_string());
        *summary.by_root_cause.entry(key).or_default() += 1;
    }

    summary
}

fn same_cause(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Records whose root cause matches `cause`, ignoring ASCII case
pub fn with_root_cause<'a>(
    records: &'a [SearchTaskRecord],
    cause: &'a str,
) -> impl Iterator<Item = &'a SearchTaskRecord> + 'a {
    records.iter().filter(move |record| {
        record
            .root_cause
            .as_deref()
            .is_some_and(|recorded| same_cause(recorded, cause))
    })
}
