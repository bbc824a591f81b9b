//! Fixtures for engine integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use fsreview_core::codec::CodecKind;
use fsreview_core::model::{File, FileInfo, Fingerprint, FingerprintMethod, Policy, Walk};
use fsreview_store::walk_filename;
use std::fs;
use std::path::{Path, PathBuf};

pub fn file(path: &str, size: u64, sha256: &str) -> File {
    File {
        version: 1,
        path: path.to_string(),
        info: FileInfo {
            name: path.rsplit('/').next().unwrap_or_default().to_string(),
            size,
            mode: 0o100644,
            is_dir: false,
            modified: None,
        },
        fingerprints: vec![Fingerprint::new(FingerprintMethod::Sha256, sha256)],
    }
}

pub fn walk(id: &str, hostname: &str, files: Vec<File>) -> Walk {
    Walk {
        id: id.to_string(),
        version: 1,
        hostname: hostname.to_string(),
        start_walk: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        stop_walk: Utc.with_ymd_and_hms(2024, 5, 1, 10, 2, 0).unwrap(),
        policy: Policy {
            version: 1,
            include: vec!["/".into()],
            exclude_pfx: vec![],
            hash_pfx: vec!["/".into()],
            ignore_irregular_files: false,
            max_hash_file_size: 0,
            max_directory_depth: 0,
            walk_cross_device: false,
        },
        files,
    }
}

/// Write `walk` under `dir` with its canonical artifact name for `day`
pub fn write_walk(dir: &Path, walk: &Walk, day: u32) -> PathBuf {
    let ts = Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap();
    let path = dir.join(walk_filename(
        Some(&walk.hostname),
        Some(ts),
        CodecKind::Compact,
    ));
    fs::write(&path, CodecKind::Compact.encode(walk).unwrap()).unwrap();
    path
}

pub fn write_report_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("report.yaml");
    fs::write(&path, yaml).unwrap();
    path
}

pub const TMP_RULE_CONFIG: &str = r#"
version: 1
exclude_pfx: ["/var/cache/"]
rules:
  - name: tmp-removed
    matcher:
      type: all
      all:
        - type: prefix
          prefix: /tmp/
        - type: kind
          kind: removed
"#;
