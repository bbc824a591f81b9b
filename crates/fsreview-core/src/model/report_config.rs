//! Reporting-time configuration: global exclusions plus classification rules.

use crate::diff::model::ChangeKind;
use crate::errors::FsReviewError;
use crate::model::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Reporting configuration, independent of the walk-time Policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub version: u32,
    /// Paths under these prefixes are dropped before rule matching
    #[serde(default)]
    pub exclude_pfx: Vec<String>,
    /// Evaluated in declared order; one entry may match many rules
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// A named classification rule as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub matcher: MatcherSpec,
}

/// Closed set of matcher shapes a rule may use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherSpec {
    /// Normalized path starts with `prefix`
    Prefix { prefix: String },
    /// Regex must match the whole normalized path
    Regex { pattern: String },
    /// Change kind filter
    Kind { kind: ChangeKind },
    /// Every nested matcher must match
    All { all: Vec<MatcherSpec> },
}

impl ReportConfig {
    /// Validate version and exclusion prefixes.
    ///
    /// Rules are validated separately when compiled.
    ///
    /// # Errors
    ///
    /// - `UnsupportedVersion` when `version` is not the current schema version
    /// - `RelativePrefix` for a non-absolute exclusion prefix
    pub fn validate(&self) -> Result<(), FsReviewError> {
        if self.version != SCHEMA_VERSION {
            return Err(FsReviewError::UnsupportedVersion {
                what: "report config".to_string(),
                version: self.version,
                expected: SCHEMA_VERSION,
            });
        }
        if let Some(bad) = self.exclude_pfx.iter().find(|p| !p.starts_with('/')) {
            return Err(FsReviewError::RelativePrefix {
                field: "exclude_pfx".to_string(),
                prefix: bad.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_spec_yaml_shape() {
        let yaml = r#"
version: 1
exclude_pfx: ["/var/log/"]
rules:
  - name: tmp-cleanup
    matcher:
      type: all
      all:
        - type: prefix
          prefix: /tmp/
        - type: kind
          kind: removed
"#;
        let cfg: ReportConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.rules.len(), 1);
        assert_eq!(
            cfg.rules[0].matcher,
            MatcherSpec::All {
                all: vec![
                    MatcherSpec::Prefix {
                        prefix: "/tmp/".into()
                    },
                    MatcherSpec::Kind {
                        kind: ChangeKind::Removed
                    },
                ]
            }
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_relative_exclusion() {
        let cfg = ReportConfig {
            version: 1,
            exclude_pfx: vec!["ignore/".into()],
            rules: vec![],
        };
        assert!(matches!(
            cfg.validate(),
            Err(FsReviewError::RelativePrefix { .. })
        ));
    }
}
