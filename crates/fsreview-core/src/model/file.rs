//! Per-file records inside a Walk.

use crate::model::fingerprint::{Fingerprint, FingerprintMethod};
use crate::path::normalize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File type mask of a Unix `st_mode`
pub const MODE_TYPE_MASK: u32 = 0o170000;
/// Regular file type bits
pub const MODE_REGULAR: u32 = 0o100000;

/// Filesystem metadata captured at snapshot time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Permission and type bits (`st_mode` layout)
    pub mode: u32,
    pub is_dir: bool,
    /// Last modification time, when the walker recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl FileInfo {
    /// Type bits of `mode`
    pub fn file_type(&self) -> u32 {
        self.mode & MODE_TYPE_MASK
    }

    /// Regular file check.
    ///
    /// A mode without any type bits (permissions only) counts as regular.
    pub fn is_regular(&self) -> bool {
        if self.is_dir {
            return false;
        }
        matches!(self.file_type(), 0 | MODE_REGULAR)
    }
}

/// One entry of a Walk, identified by its normalized path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub version: u32,
    pub path: String,
    pub info: FileInfo,
    #[serde(default)]
    pub fingerprints: Vec<Fingerprint>,
}

impl File {
    /// Comparison key: the path normalized with this file's directory flag
    pub fn normalized_path(&self) -> String {
        normalize(&self.path, self.info.is_dir)
    }

    /// First fingerprint recorded for `method`
    pub fn fingerprint(&self, method: FingerprintMethod) -> Option<&Fingerprint> {
        self.fingerprints.iter().find(|fp| fp.method == method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODE_DIR: u32 = 0o040000;

    fn info(mode: u32, is_dir: bool) -> FileInfo {
        FileInfo {
            name: "x".into(),
            size: 0,
            mode,
            is_dir,
            modified: None,
        }
    }

    #[test]
    fn test_permission_only_mode_is_regular() {
        assert!(info(0o644, false).is_regular());
        assert!(info(MODE_REGULAR | 0o644, false).is_regular());
    }

    #[test]
    fn test_symlink_and_dir_are_not_regular() {
        assert!(!info(0o120000 | 0o777, false).is_regular());
        assert!(!info(MODE_DIR | 0o755, true).is_regular());
    }

    #[test]
    fn test_normalized_path_uses_dir_flag() {
        let file = File {
            version: 1,
            path: "/etc//ssh".into(),
            info: info(MODE_DIR | 0o755, true),
            fingerprints: vec![],
        };
        assert_eq!(file.normalized_path(), "/etc/ssh/");
    }
}
