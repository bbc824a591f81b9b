#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{file, walk, write_walk};
use fsreview_core::errors::ExErrorKind;
use fsreview_core::fsreview_core_types::schema::{EVENT_END, EVENT_START, FIELD_DIFF_LEN};
use fsreview_core::logging_facility::test_capture::init_test_capture;
use fsreview_core::model::ReportConfig;
use fsreview_core::rules::RuleSet;
use fsreview_engine::{ComparisonSession, ConfirmAll, DeclineAll, SessionState, UpdateOutcome};
use fsreview_store::{read_walk, ReviewStore};
use std::fs;
use tempfile::TempDir;

fn no_rules() -> RuleSet {
    RuleSet::compile(&ReportConfig {
        version: 1,
        exclude_pfx: vec![],
        rules: vec![],
    })
    .unwrap()
}

#[test]
fn test_files_session_runs_to_reported() {
    let dir = TempDir::new().unwrap();
    let before = write_walk(
        dir.path(),
        &walk("w-1", "web-01", vec![file("/etc/passwd", 1200, "aaa")]),
        1,
    );
    let after = write_walk(
        dir.path(),
        &walk("w-2", "web-01", vec![file("/etc/passwd", 1205, "bbb")]),
        2,
    );

    let mut session = ComparisonSession::new(no_rules());
    session.load_before(&before).unwrap();
    session.load_after(&after).unwrap();
    let report = session.compare().unwrap();

    assert_eq!(report.diff.modified.len(), 1);
    assert_eq!(session.state(), SessionState::Reported);
    let ctx = session.summary_context(false).unwrap();
    assert_eq!(ctx.before.unwrap().id, "w-1");
    assert_eq!(ctx.after.id, "w-2");
}

#[test]
fn test_out_of_order_steps_are_invalid_state() {
    let mut session = ComparisonSession::new(no_rules());

    let err = session.compare().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidState);

    session.without_before().unwrap();
    let err = session.without_before().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidState);
    assert_eq!(session.state(), SessionState::BaselineLoaded);
}

#[test]
fn test_missing_baseline_keeps_session_idle() {
    let dir = TempDir::new().unwrap();
    let store = ReviewStore::open(dir.path().join("reviews.yaml")).unwrap();
    let mut session = ComparisonSession::new(no_rules());

    let err = session.load_baseline(&store, "web-01").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(session.state(), SessionState::Idle);
    session.without_before().unwrap();
}

#[test]
fn test_tampered_baseline_fails_session_before_diff() {
    let dir = TempDir::new().unwrap();
    let baseline_path = write_walk(
        dir.path(),
        &walk("w-1", "web-01", vec![file("/bin/ls", 10, "aa")]),
        1,
    );
    let store = ReviewStore::open(dir.path().join("reviews.yaml")).unwrap();
    store
        .update_baseline("web-01", &read_walk(&baseline_path).unwrap())
        .unwrap();
    fs::write(&baseline_path, b"{\"tampered\":true}").unwrap();

    let mut session = ComparisonSession::new(no_rules());
    let err = session.load_baseline(&store, "web-01").unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Tamper);
    assert_eq!(session.state(), SessionState::Failed);
    assert!(session.without_before().is_err());
}

#[test]
fn test_baseline_update_confirmed_and_declined() {
    let dir = TempDir::new().unwrap();
    let first = write_walk(
        dir.path(),
        &walk("w-1", "web-01", vec![file("/bin/ls", 10, "aa")]),
        1,
    );
    let store = ReviewStore::open(dir.path().join("reviews.json")).unwrap();

    // First run: no baseline, accept the walk
    let mut session = ComparisonSession::new(no_rules());
    session.without_before().unwrap();
    session.load_after(&first).unwrap();
    session.compare().unwrap();
    let outcome = session.update_baseline(&store, &ConfirmAll).unwrap();
    match outcome {
        UpdateOutcome::Updated(review) => assert_eq!(review.walk_id, "w-1"),
        UpdateOutcome::Declined => panic!("expected update"),
    }
    assert_eq!(session.state(), SessionState::Updated);

    // Second run against the stored baseline, declined
    write_walk(
        dir.path(),
        &walk("w-2", "web-01", vec![file("/bin/ls", 10, "bb")]),
        2,
    );
    let mut session = ComparisonSession::new(no_rules());
    session.load_baseline(&store, "web-01").unwrap();
    session.load_latest_after("web-01", dir.path()).unwrap();
    let report = session.compare().unwrap();
    assert_eq!(report.diff.modified.len(), 1);

    let outcome = session.update_baseline(&store, &DeclineAll).unwrap();
    assert_eq!(outcome, UpdateOutcome::Declined);
    assert_eq!(session.state(), SessionState::Declined);
    assert_eq!(store.read_last_good("web-01").unwrap().walk_id, "w-1");
}

#[test]
fn test_compare_logs_are_correlated_to_session() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let after = write_walk(
        dir.path(),
        &walk("w-9", "db-02", vec![file("/etc/hosts", 10, "aaa")]),
        3,
    );

    let mut session = ComparisonSession::new(no_rules());
    session.without_before().unwrap();
    session.load_after(&after).unwrap();
    session.compare().unwrap();

    let events = capture.for_session(session.context().session_id.as_str());
    let ops: Vec<_> = events
        .iter()
        .filter_map(|e| Some((e.op.clone()?, e.event.clone()?)))
        .collect();
    assert!(ops.contains(&("compare".to_string(), EVENT_START.to_string())));
    assert!(ops.contains(&("compare".to_string(), EVENT_END.to_string())));
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.field(FIELD_DIFF_LEN), Some("1"));
}
