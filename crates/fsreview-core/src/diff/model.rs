//! Diff output types.

use crate::model::{File, FingerprintMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change recorded for one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute difference for a path present in both Walks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum FieldDelta {
    Size { old: u64, new: u64 },
    Mode { old: u32, new: u32 },
    IsDir { old: bool, new: bool },
    ModTime { old: DateTime<Utc>, new: DateTime<Utc> },
    /// Same method on both sides, different digest: a content change
    Content {
        method: FingerprintMethod,
        old: String,
        new: String,
    },
    /// The after side gained a fingerprint method the before side lacked
    HashingAdded {
        method: FingerprintMethod,
        value: String,
    },
    /// The after side lost a fingerprint method the before side had
    HashingRemoved {
        method: FingerprintMethod,
        value: String,
    },
}

impl std::fmt::Display for FieldDelta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldDelta::Size { old, new } => write!(f, "size: {} => {}", old, new),
            FieldDelta::Mode { old, new } => write!(f, "mode: {:o} => {:o}", old, new),
            FieldDelta::IsDir { old, new } => write!(f, "is_dir: {} => {}", old, new),
            FieldDelta::ModTime { old, new } => {
                write!(f, "mtime: {} => {}", old.to_rfc3339(), new.to_rfc3339())
            }
            FieldDelta::Content { method, old, new } => {
                write!(f, "fingerprint[{}]: {} => {}", method, old, new)
            }
            FieldDelta::HashingAdded { method, value } => {
                write!(f, "fingerprint[{}]: (none) => {}", method, value)
            }
            FieldDelta::HashingRemoved { method, value } => {
                write!(f, "fingerprint[{}]: {} => (none)", method, value)
            }
        }
    }
}

/// One Added/Removed/Modified record for a single normalized path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffEntry {
    Added {
        path: String,
        file: File,
    },
    Removed {
        path: String,
        file: File,
    },
    Modified {
        path: String,
        before: File,
        after: File,
        deltas: Vec<FieldDelta>,
    },
}

impl DiffEntry {
    /// Normalized path this entry describes
    pub fn path(&self) -> &str {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Modified { path, .. } => path,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            DiffEntry::Added { .. } => ChangeKind::Added,
            DiffEntry::Removed { .. } => ChangeKind::Removed,
            DiffEntry::Modified { .. } => ChangeKind::Modified,
        }
    }

    /// Field deltas; empty for Added and Removed
    pub fn deltas(&self) -> &[FieldDelta] {
        match self {
            DiffEntry::Modified { deltas, .. } => deltas,
            _ => &[],
        }
    }
}

/// Complete, path-ordered result of comparing two Walks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSet {
    /// False in first-run mode (no before Walk)
    pub before_present: bool,
    pub before_files: u64,
    pub after_files: u64,
    /// One-sided fingerprints the Policy explained and that were not reported
    pub suppressed_hashing: u64,
    /// Sorted by normalized path, at most one entry per path
    pub entries: Vec<DiffEntry>,
}

impl DiffSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
