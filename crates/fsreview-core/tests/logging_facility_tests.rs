#![allow(clippy::unwrap_used, clippy::expect_used)]

use fsreview_core::errors::{ExError, ExErrorKind, FsReviewError};
use fsreview_core::fsreview_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use fsreview_core::logging_facility::test_capture::init_test_capture;
use fsreview_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    assert_eq!(capture.find(op_name, EVENT_START).len(), 1);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.find(op_name, EVENT_END);
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].duration_ms, Some(42));
}

#[test]
fn test_log_op_error_records_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = FsReviewError::ReviewNotFound {
        hostname: "web-01".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let errors = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].err_code.as_deref(), Some("ERR_NOT_FOUND"));
    assert_eq!(errors[0].err_kind.as_deref(), Some("NotFound"));
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = ExError::new(ExErrorKind::Tamper).with_hostname("web-01");
    log_op_error!(op_name, err, duration_ms = 1, hostname = "web-01");

    let errors = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(errors[0].err_code.as_deref(), Some("ERR_TAMPER"));
    assert_eq!(errors[0].hostname.as_deref(), Some("web-01"));
}

#[test]
fn test_start_fields_are_captured() {
    let capture = init_test_capture();
    let op_name = "test_log_fields_unique_5";

    log_op_start!(op_name, hostname = "db-02", walk_id = "w-1");

    let starts = capture.find(op_name, EVENT_START);
    assert_eq!(starts[0].fields.get("hostname"), Some(&"db-02".to_string()));
    assert_eq!(starts[0].fields.get("walk_id"), Some(&"w-1".to_string()));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_missing_event() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}
