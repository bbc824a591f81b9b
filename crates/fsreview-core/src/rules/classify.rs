//! Classification of a DiffSet against a ReportConfig.
//!
//! Two steps, in order:
//!
//! 1. **Exclusion**: entries under any `exclude_pfx` are dropped and counted.
//! 2. **Rule matching**: each surviving entry is tested against every rule in
//!    declared order. An entry may land in several rule buckets; an entry
//!    that matches none is `unmatched`.

use crate::diff::model::{DiffEntry, DiffSet};
use crate::errors::{ExError, Result};
use crate::model::ReportConfig;
use crate::rules::matcher::{compile_rules, CompiledRule};
use serde::Serialize;

/// Entries one rule accounted for, in path order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleResult {
    pub rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entries: Vec<DiffEntry>,
}

/// Output of the rule engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Entries dropped by a global exclusion prefix
    pub excluded: Vec<DiffEntry>,
    /// Entries that survived exclusion, in path order
    pub retained: Vec<DiffEntry>,
    /// One bucket per rule, in declared rule order
    pub rule_results: Vec<RuleResult>,
    /// Retained entries no rule matched
    pub unmatched: Vec<DiffEntry>,
}

/// Exclusion prefixes plus compiled rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    exclude_pfx: Vec<String>,
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Validate and compile a ReportConfig.
    ///
    /// # Errors
    ///
    /// - `ConfigError` for an unsupported version or relative exclusion prefix
    /// - `RuleConfig` for the first malformed rule
    pub fn compile(config: &ReportConfig) -> Result<Self> {
        config.validate().map_err(ExError::from)?;
        let rules = compile_rules(&config.rules)?;
        Ok(Self {
            exclude_pfx: config.exclude_pfx.clone(),
            rules,
        })
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_pfx
            .iter()
            .any(|pfx| path.starts_with(pfx.as_str()))
    }

    /// Classify every entry of `diff`. Infallible once compiled.
    pub fn classify(&self, diff: &DiffSet) -> Classification {
        let (excluded, retained): (Vec<DiffEntry>, Vec<DiffEntry>) = diff
            .entries
            .iter()
            .cloned()
            .partition(|e| self.is_excluded(e.path()));

        let mut rule_results: Vec<RuleResult> = self
            .rules
            .iter()
            .map(|r| RuleResult {
                rule: r.name.clone(),
                description: r.description.clone(),
                entries: Vec::new(),
            })
            .collect();
        let mut unmatched = Vec::new();

        for entry in &retained {
            let mut matched = false;
            for (rule, bucket) in self.rules.iter().zip(rule_results.iter_mut()) {
                if rule.matches(entry) {
                    bucket.entries.push(entry.clone());
                    matched = true;
                }
            }
            if !matched {
                unmatched.push(entry.clone());
            }
        }

        Classification {
            excluded,
            retained,
            rule_results,
            unmatched,
        }
    }
}

/// Compile `config` and classify `diff` in one step.
///
/// # Errors
///
/// See [`RuleSet::compile`]. A malformed rule fails the whole call; nothing
/// is classified.
pub fn classify(diff: &DiffSet, config: &ReportConfig) -> Result<Classification> {
    Ok(RuleSet::compile(config)?.classify(diff))
}
