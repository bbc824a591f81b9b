//! Shared builders for fsreview-core integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use fsreview_core::model::{File, FileInfo, Fingerprint, FingerprintMethod, Policy, Walk};

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

/// Policy that hashes everything under `/`
pub fn hash_all_policy() -> Policy {
    Policy {
        version: 1,
        include: vec!["/".into()],
        exclude_pfx: vec![],
        hash_pfx: vec!["/".into()],
        ignore_irregular_files: false,
        max_hash_file_size: 0,
        max_directory_depth: 0,
        walk_cross_device: false,
    }
}

pub fn file(path: &str, size: u64, sha256: Option<&str>) -> File {
    let name = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    File {
        version: 1,
        path: path.to_string(),
        info: FileInfo {
            name,
            size,
            mode: 0o100644,
            is_dir: false,
            modified: None,
        },
        fingerprints: sha256
            .map(|v| vec![Fingerprint::new(FingerprintMethod::Sha256, v)])
            .unwrap_or_default(),
    }
}

pub fn dir(path: &str) -> File {
    let mut f = file(path, 4096, None);
    f.info.is_dir = true;
    f.info.mode = 0o040755;
    f
}

pub fn walk(id: &str, files: Vec<File>) -> Walk {
    walk_with_policy(id, hash_all_policy(), files)
}

pub fn walk_with_policy(id: &str, policy: Policy, files: Vec<File>) -> Walk {
    Walk {
        id: id.to_string(),
        version: 1,
        hostname: "web-01".to_string(),
        start_walk: ts(1_700_000_000),
        stop_walk: ts(1_700_000_060),
        policy,
        files,
    }
}
