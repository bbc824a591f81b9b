#![allow(clippy::unwrap_used)]

use fsreview_core::errors::{ExError, ExErrorKind, FsReviewError};
use std::error::Error as _;

#[test]
fn test_not_found_and_tamper_are_distinct() {
    let missing: ExError = FsReviewError::ReviewNotFound {
        hostname: "web-01".into(),
    }
    .into();
    let tampered: ExError = FsReviewError::FingerprintMismatch {
        hostname: "web-01".into(),
        reference: "/walks/web-01.json".into(),
        method: "SHA256".into(),
        expected: "aa".into(),
        actual: "bb".into(),
    }
    .into();

    assert_eq!(missing.kind(), ExErrorKind::NotFound);
    assert_eq!(tampered.kind(), ExErrorKind::Tamper);
    assert_eq!(tampered.path(), Some("/walks/web-01.json"));
    assert_eq!(tampered.hostname(), Some("web-01"));
}

#[test]
fn test_missing_baseline_artifact_is_tamper() {
    let err: ExError = FsReviewError::BaselineArtifactMissing {
        hostname: "h".into(),
        reference: "/gone".into(),
    }
    .into();
    assert_eq!(err.code(), "ERR_TAMPER");
}

#[test]
fn test_mode_errors_are_config_errors() {
    for e in [FsReviewError::ConflictingModes, FsReviewError::MissingModeInputs] {
        let ex: ExError = e.into();
        assert_eq!(ex.kind(), ExErrorKind::ConfigError);
    }
}

#[test]
fn test_walk_not_found_is_not_found() {
    let ex: ExError = FsReviewError::WalkNotFound {
        pattern: "web-01-*-fswalker-state.*".into(),
        search_path: "/var/walks".into(),
    }
    .into();
    assert_eq!(ex.kind(), ExErrorKind::NotFound);
    assert!(ex.message().contains("/var/walks"));
}

#[test]
fn test_source_chain_exposed() {
    let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
    let outer = ExError::new(ExErrorKind::Persistence)
        .with_op("update_baseline")
        .with_source(inner);

    let source = outer.source().unwrap();
    assert!(source.to_string().contains("disk gone"));
    assert!(outer.to_string().contains("caused by"));
}
