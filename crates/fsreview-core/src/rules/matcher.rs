//! Rule compilation.
//!
//! Rules are compiled once, when a ReportConfig is loaded, so a malformed
//! matcher is rejected before any diff is classified.

use crate::diff::model::{ChangeKind, DiffEntry};
use crate::errors::{ExError, ExErrorKind};
use crate::model::{MatcherSpec, RuleConfig};
use regex::Regex;
use std::collections::BTreeSet;

#[derive(Debug, thiserror::Error)]
pub enum RuleCompileError {
    #[error("rule has an empty name")]
    MissingName,

    #[error("rule '{rule}' is declared more than once")]
    DuplicateName { rule: String },

    #[error("rule '{rule}' has an empty prefix")]
    EmptyPrefix { rule: String },

    #[error("rule '{rule}' has an empty regex")]
    EmptyPattern { rule: String },

    #[error("rule '{rule}' has invalid regex '{pattern}': {source}")]
    InvalidRegex {
        rule: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("rule '{rule}' has an 'all' matcher with no members")]
    EmptyAll { rule: String },
}

impl RuleCompileError {
    /// Name of the offending rule, when it has one
    pub fn rule(&self) -> Option<&str> {
        match self {
            RuleCompileError::MissingName => None,
            RuleCompileError::DuplicateName { rule }
            | RuleCompileError::EmptyPrefix { rule }
            | RuleCompileError::EmptyPattern { rule }
            | RuleCompileError::InvalidRegex { rule, .. }
            | RuleCompileError::EmptyAll { rule } => Some(rule),
        }
    }
}

impl From<RuleCompileError> for ExError {
    fn from(err: RuleCompileError) -> Self {
        let mut ex = ExError::new(ExErrorKind::RuleConfig)
            .with_op("compile_rules")
            .with_message(err.to_string());
        if let Some(rule) = err.rule() {
            ex = ex.with_rule(rule);
        }
        ex
    }
}

/// A matcher ready to evaluate against diff entries
#[derive(Debug, Clone)]
pub enum CompiledMatcher {
    Prefix(String),
    Regex(Regex),
    Kind(ChangeKind),
    All(Vec<CompiledMatcher>),
}

impl CompiledMatcher {
    pub fn matches(&self, entry: &DiffEntry) -> bool {
        match self {
            CompiledMatcher::Prefix(prefix) => entry.path().starts_with(prefix.as_str()),
            CompiledMatcher::Regex(re) => re.is_match(entry.path()),
            CompiledMatcher::Kind(kind) => entry.kind() == *kind,
            CompiledMatcher::All(all) => all.iter().all(|m| m.matches(entry)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub name: String,
    pub description: Option<String>,
    pub matcher: CompiledMatcher,
}

impl CompiledRule {
    pub fn matches(&self, entry: &DiffEntry) -> bool {
        self.matcher.matches(entry)
    }
}

/// Compile rules in declared order.
///
/// # Errors
///
/// The first malformed rule aborts compilation; no partial rule set is
/// returned.
pub fn compile_rules(configs: &[RuleConfig]) -> Result<Vec<CompiledRule>, RuleCompileError> {
    let mut out = Vec::with_capacity(configs.len());
    let mut seen = BTreeSet::new();

    for cfg in configs {
        if cfg.name.trim().is_empty() {
            return Err(RuleCompileError::MissingName);
        }
        if !seen.insert(cfg.name.as_str()) {
            return Err(RuleCompileError::DuplicateName {
                rule: cfg.name.clone(),
            });
        }

        out.push(CompiledRule {
            name: cfg.name.clone(),
            description: cfg.description.clone(),
            matcher: compile_matcher(&cfg.matcher, &cfg.name)?,
        });
    }

    Ok(out)
}

fn compile_matcher(spec: &MatcherSpec, rule: &str) -> Result<CompiledMatcher, RuleCompileError> {
    match spec {
        MatcherSpec::Prefix { prefix } => {
            if prefix.is_empty() {
                return Err(RuleCompileError::EmptyPrefix {
                    rule: rule.to_string(),
                });
            }
            Ok(CompiledMatcher::Prefix(prefix.clone()))
        }
        MatcherSpec::Regex { pattern } => {
            if pattern.is_empty() {
                return Err(RuleCompileError::EmptyPattern {
                    rule: rule.to_string(),
                });
            }
            // Whole-path match
            let anchored = format!("^(?:{})$", pattern);
            let re = Regex::new(&anchored).map_err(|e| RuleCompileError::InvalidRegex {
                rule: rule.to_string(),
                pattern: pattern.clone(),
                source: e,
            })?;
            Ok(CompiledMatcher::Regex(re))
        }
        MatcherSpec::Kind { kind } => Ok(CompiledMatcher::Kind(*kind)),
        MatcherSpec::All { all } => {
            if all.is_empty() {
                return Err(RuleCompileError::EmptyAll {
                    rule: rule.to_string(),
                });
            }
            let compiled = all
                .iter()
                .map(|m| compile_matcher(m, rule))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CompiledMatcher::All(compiled))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{File, FileInfo};

    fn rule(name: &str, matcher: MatcherSpec) -> RuleConfig {
        RuleConfig {
            name: name.to_string(),
            description: None,
            matcher,
        }
    }

    fn removed(path: &str) -> DiffEntry {
        DiffEntry::Removed {
            path: path.to_string(),
            file: File {
                version: 1,
                path: path.to_string(),
                info: FileInfo {
                    name: "a".into(),
                    size: 0,
                    mode: 0o100644,
                    is_dir: false,
                    modified: None,
                },
                fingerprints: vec![],
            },
        }
    }

    #[test]
    fn compile_and_match_compound_rule() {
        let cfg = rule(
            "tmp-removed",
            MatcherSpec::All {
                all: vec![
                    MatcherSpec::Prefix {
                        prefix: "/tmp/".into(),
                    },
                    MatcherSpec::Kind {
                        kind: ChangeKind::Removed,
                    },
                ],
            },
        );
        let rules = compile_rules(&[cfg]).unwrap();
        assert!(rules[0].matches(&removed("/tmp/a")));
        assert!(!rules[0].matches(&removed("/var/a")));
    }

    #[test]
    fn regex_matches_whole_path_only() {
        let rules = compile_rules(&[rule(
            "logs",
            MatcherSpec::Regex {
                pattern: "/var/log/.*\\.log".into(),
            },
        )])
        .unwrap();
        assert!(rules[0].matches(&removed("/var/log/syslog.log")));
        assert!(!rules[0].matches(&removed("/srv/var/log/syslog.log")));
        assert!(!rules[0].matches(&removed("/var/log/syslog.log.1")));
    }

    #[test]
    fn invalid_regex_is_rule_config_error() {
        let err = compile_rules(&[rule(
            "broken",
            MatcherSpec::Regex {
                pattern: "(unclosed".into(),
            },
        )])
        .unwrap_err();
        assert!(matches!(err, RuleCompileError::InvalidRegex { .. }));

        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::RuleConfig);
        assert_eq!(ex.rule(), Some("broken"));
    }

    #[test]
    fn duplicate_and_empty_rules_rejected() {
        let p = || MatcherSpec::Prefix { prefix: "/".into() };
        assert!(matches!(
            compile_rules(&[rule("a", p()), rule("a", p())]),
            Err(RuleCompileError::DuplicateName { .. })
        ));
        assert!(matches!(
            compile_rules(&[rule(" ", p())]),
            Err(RuleCompileError::MissingName)
        ));
        assert!(matches!(
            compile_rules(&[rule("e", MatcherSpec::All { all: vec![] })]),
            Err(RuleCompileError::EmptyAll { .. })
        ));
        assert!(matches!(
            compile_rules(&[rule(
                "e",
                MatcherSpec::Prefix {
                    prefix: String::new()
                }
            )]),
            Err(RuleCompileError::EmptyPrefix { .. })
        ));
    }
}
