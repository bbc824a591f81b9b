//! Walk-time policy.
//!
//! The Policy is what the walker obeyed when it produced a Walk. The engine
//! only consults it to decide whether a file was *eligible* to be hashed:
//! a missing fingerprint on an ineligible file is expected, not a change.

use crate::errors::FsReviewError;
use crate::model::file::File;
use crate::model::SCHEMA_VERSION;
use crate::path::normalize;
use serde::{Deserialize, Serialize};

/// Walk-time policy carried inside every Walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub version: u32,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude_pfx: Vec<String>,
    #[serde(default)]
    pub hash_pfx: Vec<String>,
    #[serde(default)]
    pub ignore_irregular_files: bool,
    /// Largest file the walker hashes; 0 means unlimited
    #[serde(default)]
    pub max_hash_file_size: u64,
    #[serde(default)]
    pub max_directory_depth: u32,
    #[serde(default)]
    pub walk_cross_device: bool,
}

/// Why a file was or was not eligible for hashing under a Policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashEligibility {
    Eligible,
    Directory,
    OutsideHashPrefixes,
    Irregular,
    TooLarge,
}

impl HashEligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, HashEligibility::Eligible)
    }
}

impl Policy {
    /// Validate a freshly loaded policy.
    ///
    /// # Errors
    ///
    /// - `UnsupportedVersion` when `version` is not the current schema version
    /// - `EmptyInclude` when nothing is included
    /// - `RelativePrefix` for any prefix that is not absolute
    pub fn validate(&self) -> Result<(), FsReviewError> {
        if self.version != SCHEMA_VERSION {
            return Err(FsReviewError::UnsupportedVersion {
                what: "policy".to_string(),
                version: self.version,
                expected: SCHEMA_VERSION,
            });
        }
        if self.include.is_empty() {
            return Err(FsReviewError::EmptyInclude);
        }
        let fields = [
            ("include", &self.include),
            ("exclude_pfx", &self.exclude_pfx),
            ("hash_pfx", &self.hash_pfx),
        ];
        for (field, prefixes) in fields {
            if let Some(bad) = prefixes.iter().find(|p| !p.starts_with('/')) {
                return Err(FsReviewError::RelativePrefix {
                    field: field.to_string(),
                    prefix: bad.clone(),
                });
            }
        }
        Ok(())
    }

    /// Decide whether the walker was expected to fingerprint `file`.
    ///
    /// Checks run in a fixed order and the first failing one is reported:
    /// directory, hash prefix, irregular file type, size limit.
    pub fn hash_eligibility(&self, file: &File) -> HashEligibility {
        if file.info.is_dir {
            return HashEligibility::Directory;
        }
        let path = normalize(&file.path, false);
        if !self.hash_pfx.iter().any(|pfx| path.starts_with(pfx.as_str())) {
            return HashEligibility::OutsideHashPrefixes;
        }
        if self.ignore_irregular_files && !file.info.is_regular() {
            return HashEligibility::Irregular;
        }
        if self.max_hash_file_size != 0 && file.info.size > self.max_hash_file_size {
            return HashEligibility::TooLarge;
        }
        HashEligibility::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::FileInfo;

    fn policy() -> Policy {
        Policy {
            version: 1,
            include: vec!["/".into()],
            exclude_pfx: vec!["/tmp/".into()],
            hash_pfx: vec!["/etc/".into()],
            ignore_irregular_files: true,
            max_hash_file_size: 1024,
            max_directory_depth: 100,
            walk_cross_device: false,
        }
    }

    fn file(path: &str, size: u64, mode: u32, is_dir: bool) -> File {
        File {
            version: 1,
            path: path.into(),
            info: FileInfo {
                name: path.rsplit('/').next().unwrap_or_default().into(),
                size,
                mode,
                is_dir,
                modified: None,
            },
            fingerprints: vec![],
        }
    }

    #[test]
    fn test_eligible_regular_file_under_hash_prefix() {
        let p = policy();
        assert_eq!(
            p.hash_eligibility(&file("/etc/passwd", 100, 0o100644, false)),
            HashEligibility::Eligible
        );
    }

    #[test]
    fn test_directory_is_never_eligible() {
        let p = policy();
        assert_eq!(
            p.hash_eligibility(&file("/etc/ssh", 4096, 0o040755, true)),
            HashEligibility::Directory
        );
    }

    #[test]
    fn test_outside_hash_prefix() {
        let p = policy();
        assert_eq!(
            p.hash_eligibility(&file("/usr/bin/ls", 100, 0o100755, false)),
            HashEligibility::OutsideHashPrefixes
        );
    }

    #[test]
    fn test_irregular_only_when_ignored() {
        let mut p = policy();
        let fifo = file("/etc/initctl", 0, 0o010600, false);
        assert_eq!(p.hash_eligibility(&fifo), HashEligibility::Irregular);
        p.ignore_irregular_files = false;
        assert_eq!(p.hash_eligibility(&fifo), HashEligibility::Eligible);
    }

    #[test]
    fn test_size_limit_zero_is_unlimited() {
        let mut p = policy();
        let big = file("/etc/big.db", 4096, 0o100644, false);
        assert_eq!(p.hash_eligibility(&big), HashEligibility::TooLarge);
        p.max_hash_file_size = 0;
        assert_eq!(p.hash_eligibility(&big), HashEligibility::Eligible);
    }

    #[test]
    fn test_validate_rejects_relative_prefix() {
        let mut p = policy();
        p.hash_pfx.push("etc/".into());
        assert!(matches!(
            p.validate(),
            Err(FsReviewError::RelativePrefix { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_include_and_bad_version() {
        let mut p = policy();
        p.include.clear();
        assert_eq!(p.validate(), Err(FsReviewError::EmptyInclude));

        let mut p = policy();
        p.version = 7;
        assert!(matches!(
            p.validate(),
            Err(FsReviewError::UnsupportedVersion { version: 7, .. })
        ));
    }
}
