//! Snapshot artifacts on disk.
//!
//! One serialized Walk per file, named
//! `<hostname>-<YYYYMMDD-HHMMSS>-fswalker-state.<ext>`. The extension picks
//! the codec.

use crate::errors::{decode_error, io_error, unsupported_walk, Result};
use chrono::{DateTime, Utc};
use fsreview_core::codec::CodecKind;
use fsreview_core::errors::{ExError, ExErrorKind, FsReviewError};
use fsreview_core::model::{Fingerprint, Walk, SCHEMA_VERSION};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp layout used in artifact names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const WILDCARD: &str = "*";
const SUFFIX: &str = "fswalker-state";

/// A loaded Walk together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkFile {
    pub path: PathBuf,
    pub walk: Walk,
    /// SHA-256 over the artifact bytes as read
    pub fingerprint: Fingerprint,
}

impl WalkFile {
    /// Locator string recorded in a Review
    pub fn locator(&self) -> String {
        self.path.display().to_string()
    }
}

/// Artifact file name for a host and time.
///
/// A missing hostname or timestamp becomes `*`, turning the name into a
/// search pattern.
pub fn walk_filename(
    hostname: Option<&str>,
    timestamp: Option<DateTime<Utc>>,
    codec: CodecKind,
) -> String {
    let host = hostname.filter(|h| !h.is_empty()).unwrap_or(WILDCARD);
    let ts = timestamp
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| WILDCARD.to_string());
    format!("{}-{}-{}.{}", host, ts, SUFFIX, codec.extension())
}

/// Display form of the search pattern for `hostname`, any extension
fn search_pattern(hostname: &str) -> String {
    format!("{}-{}-{}.{}", hostname, WILDCARD, SUFFIX, WILDCARD)
}

fn name_matcher(hostname: &str) -> Result<Regex> {
    let extensions = CodecKind::EXTENSIONS.join("|");
    let pattern = format!(
        r"^{}-\d{{8}}-\d{{6}}-{}\.(?:{})$",
        regex::escape(hostname),
        SUFFIX,
        extensions
    );
    Regex::new(&pattern).map_err(|e| {
        ExError::new(ExErrorKind::Internal)
            .with_op("find_latest_walk")
            .with_message(e.to_string())
    })
}

/// Newest artifact for `hostname` under `search_path`.
///
/// Newest is the lexicographically greatest matching file name, which with
/// the fixed timestamp layout is also the latest timestamp.
///
/// # Errors
///
/// - `NotFound` if the directory holds no matching artifact
/// - `Io` if the directory cannot be listed
pub fn find_latest_walk(hostname: &str, search_path: &Path) -> Result<PathBuf> {
    let matcher = name_matcher(hostname)?;
    let entries =
        fs::read_dir(search_path).map_err(|e| io_error("find_latest_walk", search_path, e))?;

    let mut latest: Option<(String, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| io_error("find_latest_walk", search_path, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !matcher.is_match(&name) {
            continue;
        }
        if latest.as_ref().map_or(true, |(best, _)| name > *best) {
            latest = Some((name, entry.path()));
        }
    }

    latest.map(|(_, path)| path).ok_or_else(|| {
        FsReviewError::WalkNotFound {
            pattern: search_pattern(hostname),
            search_path: search_path.display().to_string(),
        }
        .into()
    })
}

/// Decode artifact bytes already read from `path`
pub(crate) fn decode_walk(path: &Path, bytes: &[u8]) -> Result<WalkFile> {
    let codec = CodecKind::for_path(path)?;
    let walk: Walk = codec
        .decode(bytes)
        .map_err(|e| decode_error("read_walk", path, e))?;
    if walk.version != SCHEMA_VERSION {
        return Err(unsupported_walk(path, walk.version));
    }
    // Rejects duplicate normalized paths
    walk.index()
        .map_err(|e| ExError::from(e).with_path(path.display().to_string()))?;

    Ok(WalkFile {
        path: path.to_path_buf(),
        walk,
        fingerprint: Fingerprint::sha256(bytes),
    })
}

/// Read and decode one Walk artifact.
///
/// # Errors
///
/// - `NotFound` if the file does not exist
/// - `ConfigError` if its extension maps to no codec
/// - `Decode` if the bytes are not a Walk of the current version
/// - `InvalidInput` if the Walk lists a normalized path twice
pub fn read_walk(path: &Path) -> Result<WalkFile> {
    // Locators recorded in Reviews must resolve from any working directory
    let path = fs::canonicalize(path).map_err(|e| io_error("read_walk", path, e))?;
    let bytes = fs::read(&path).map_err(|e| io_error("read_walk", &path, e))?;
    let walk_file = decode_walk(&path, &bytes)?;
    tracing::debug!(
        path = %path.display(),
        walk_id = %walk_file.walk.id,
        files = walk_file.walk.files.len(),
        "walk loaded"
    );
    Ok(walk_file)
}

/// Find and read the newest Walk for `hostname` under `search_path`.
///
/// # Errors
///
/// See [`find_latest_walk`] and [`read_walk`].
pub fn read_latest_walk(hostname: &str, search_path: &Path) -> Result<WalkFile> {
    let path = find_latest_walk(hostname, search_path)?;
    read_walk(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_walk_filename_full() {
        let t = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap();
        assert_eq!(
            walk_filename(Some("web-01"), Some(t), CodecKind::Compact),
            "web-01-20240305-070809-fswalker-state.json"
        );
    }

    #[test]
    fn test_walk_filename_wildcards() {
        assert_eq!(
            walk_filename(None, None, CodecKind::Text),
            "*-*-fswalker-state.yaml"
        );
        assert_eq!(
            walk_filename(Some(""), None, CodecKind::Compact),
            "*-*-fswalker-state.json"
        );
    }

    #[test]
    fn test_name_matcher_is_host_exact() {
        let m = name_matcher("web-01").unwrap();
        assert!(m.is_match("web-01-20240305-070809-fswalker-state.json"));
        assert!(m.is_match("web-01-20240305-070809-fswalker-state.yml"));
        assert!(!m.is_match("web-010-20240305-070809-fswalker-state.json"));
        assert!(!m.is_match("web-01-20240305-070809-fswalker-state.pb"));
        assert!(!m.is_match("xweb-01-20240305-070809-fswalker-state.json"));
    }

    #[test]
    fn test_name_matcher_escapes_hostname() {
        let m = name_matcher("a.b").unwrap();
        assert!(m.is_match("a.b-20240305-070809-fswalker-state.json"));
        assert!(!m.is_match("axb-20240305-070809-fswalker-state.json"));
    }
}
