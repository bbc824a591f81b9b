//! Report aggregation.
//!
//! [`aggregate`] is a pure function of the DiffSet and its Classification:
//! the same inputs always produce the same Report, counters included.

use crate::diff::model::{ChangeKind, DiffEntry, DiffSet};
use crate::report::counter::{
    rule_metric, Counter, METRIC_ADDED, METRIC_AFTER_FILES, METRIC_BEFORE_FILES,
    METRIC_EXCLUDED, METRIC_HASHING_SUPPRESSED, METRIC_MODIFIED, METRIC_REMOVED,
    METRIC_UNMATCHED,
};
use crate::rules::classify::{Classification, RuleResult};
use serde::Serialize;

/// Unexcluded diff entries split by kind, each in path order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportDiff {
    pub added: Vec<DiffEntry>,
    pub removed: Vec<DiffEntry>,
    pub modified: Vec<DiffEntry>,
}

/// Result of one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub before_present: bool,
    pub rule_results: Vec<RuleResult>,
    pub diff: ReportDiff,
    pub unmatched: Vec<DiffEntry>,
    pub counter: Counter,
}

pub fn aggregate(diff: &DiffSet, classification: &Classification) -> Report {
    let mut buckets = ReportDiff::default();
    for entry in &classification.retained {
        let bucket = match entry.kind() {
            ChangeKind::Added => &mut buckets.added,
            ChangeKind::Removed => &mut buckets.removed,
            ChangeKind::Modified => &mut buckets.modified,
        };
        bucket.push(entry.clone());
    }

    let mut counter = Counter::new();
    counter.set(METRIC_BEFORE_FILES, diff.before_files as i64);
    counter.set(METRIC_AFTER_FILES, diff.after_files as i64);
    counter.set(METRIC_ADDED, buckets.added.len() as i64);
    counter.set(METRIC_REMOVED, buckets.removed.len() as i64);
    counter.set(METRIC_MODIFIED, buckets.modified.len() as i64);
    counter.set(METRIC_EXCLUDED, classification.excluded.len() as i64);
    counter.set(METRIC_UNMATCHED, classification.unmatched.len() as i64);
    counter.set(METRIC_HASHING_SUPPRESSED, diff.suppressed_hashing as i64);
    for result in &classification.rule_results {
        counter.set(rule_metric(&result.rule), result.entries.len() as i64);
    }

    Report {
        before_present: diff.before_present,
        rule_results: classification.rule_results.clone(),
        diff: buckets,
        unmatched: classification.unmatched.clone(),
        counter,
    }
}
