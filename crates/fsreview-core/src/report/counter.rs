//! Named metric counters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const METRIC_BEFORE_FILES: &str = "before-files";
pub const METRIC_AFTER_FILES: &str = "after-files";
pub const METRIC_ADDED: &str = "added";
pub const METRIC_REMOVED: &str = "removed";
pub const METRIC_MODIFIED: &str = "modified";
pub const METRIC_EXCLUDED: &str = "excluded";
pub const METRIC_UNMATCHED: &str = "unmatched";
pub const METRIC_HASHING_SUPPRESSED: &str = "hashing-suppressed";

/// Metric name for a rule's match count
pub fn rule_metric(rule: &str) -> String {
    format!("rule:{}", rule)
}

/// Metric name → value, iterated in name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    counts: BTreeMap<String, i64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, metric: impl Into<String>, value: i64) {
        self.counts.insert(metric.into(), value);
    }

    pub fn get(&self, metric: &str) -> Option<i64> {
        self.counts.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
