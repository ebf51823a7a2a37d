#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apidrift_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_BREAKING, FIELD_DIFF_DIGEST, FIELD_DURATION_MS,
    FIELD_ENDPOINT_COUNT, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_METHOD, FIELD_PATH,
};
use apidrift_core::core_types::JobId;
use apidrift_core::errors::SummaryError;
use apidrift_core::logging_facility::init_test_capture;
use apidrift_core::{log_op_end, log_op_error, log_op_start};
use apidrift_core::{payload_digest, summarize_with, MarkdownRenderer};
use common::{changed_get_pet, diff_bytes, petstore};
use serde_json::json;

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_1";

    log_op_start!(op_name);
    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end.field(FIELD_DURATION_MS), Some("42"));
    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_error_records_stable_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_2";

    let err = SummaryError::MalformedDiff {
        message: "eof".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 5);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_MALFORMED_DIFF"));
    assert_eq!(error_event.field(FIELD_ERR_KIND), Some("MalformedDiff"));
}

#[test]
fn test_summarize_logs_start_and_end_for_job() {
    let capture = init_test_capture();
    let job_id = JobId::new();
    let diff = json!({
        "newEndpoints": [{"method": "GET", "pathUrl": "/pet"}],
        "changedOperations": [changed_get_pet(json!({"incompatible": true}))]
    });
    let bytes = diff_bytes(&diff);
    let doc = petstore();

    let report = summarize_with(&MarkdownRenderer, &job_id, &bytes, &doc, &doc).unwrap();
    assert!(report.breaking);

    let events = capture.events_for_job(job_id.as_str());
    assert_eq!(events.len(), 2, "exactly one start and one end: {:?}", events);

    let start = &events[0];
    assert_eq!(start.event.as_deref(), Some(EVENT_START));
    assert_eq!(start.op.as_deref(), Some("summarize"));
    let digest = payload_digest(&bytes);
    assert_eq!(start.field(FIELD_DIFF_DIGEST), Some(digest.as_str()));

    let end = &events[1];
    assert_eq!(end.event.as_deref(), Some(EVENT_END));
    assert_eq!(end.field(FIELD_ENDPOINT_COUNT), Some("2"));
    assert_eq!(end.field(FIELD_BREAKING), Some("true"));
    assert!(end.field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_summarize_failure_logs_error_for_job() {
    let capture = init_test_capture();
    let job_id = JobId::from_string("job-summarize-failure");
    let doc = petstore();
    let diff = json!({
        "changedOperations": [{"pathUrl": "/nowhere", "httpMethod": "GET"}]
    });

    let err = summarize_with(&MarkdownRenderer, &job_id, &diff_bytes(&diff), &doc, &doc)
        .unwrap_err();
    assert!(matches!(err, SummaryError::OperationNotFound { .. }));

    let events = capture.events_for_job(job_id.as_str());
    let error_event = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field(FIELD_ERR_CODE), Some("ERR_OPERATION_NOT_FOUND"));
    assert!(!events.iter().any(|e| e.event.as_deref() == Some(EVENT_END)));
}

#[test]
fn test_builder_logs_each_changed_operation() {
    let capture = init_test_capture();
    let doc = petstore();
    let diff = json!({
        "changedOperations": [{"pathUrl": "/store/inventory", "httpMethod": "get"}]
    });

    summarize_with(
        &MarkdownRenderer,
        &JobId::new(),
        &diff_bytes(&diff),
        &doc,
        &doc,
    )
    .unwrap();

    let found = capture.events().iter().any(|e| {
        e.field(FIELD_PATH) == Some("/store/inventory") && e.field(FIELD_METHOD) == Some("GET")
    });
    assert!(found, "Should log the changed operation");
}
