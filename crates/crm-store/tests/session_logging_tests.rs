#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{sample_customer, setup_test_db};
use crm_core::logging_facility::init_test_capture;
use crm_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use crm_store::Session;

// The capture is process-global; tests filter on their own request id.

#[test]
fn test_session_ops_log_start_and_end_with_request_id() {
    let capture = init_test_capture();
    let mut conn = setup_test_db();
    let session = Session::begin(&mut conn).unwrap();
    let request_id = session.context().request_id.as_str().to_string();

    session.save(&sample_customer()).unwrap();
    session.commit().unwrap();

    let mine = |op: &str, event: &str| {
        capture.count_events(|e| {
            e.op.as_deref() == Some(op)
                && e.event.as_deref() == Some(event)
                && e.field("request_id") == Some(request_id.as_str())
        })
    };
    assert_eq!(mine("session_save", EVENT_START), 1);
    assert_eq!(mine("session_save", EVENT_END), 1);
    assert_eq!(mine("session_commit", EVENT_END), 1);
}

#[test]
fn test_failed_resolve_logs_error_code() {
    let capture = init_test_capture();
    let mut conn = setup_test_db();
    let session = Session::begin(&mut conn).unwrap();
    let request_id = session.context().request_id.as_str().to_string();

    let _ = session.resolve(session.load("c-nowhere"));

    let errors: Vec<_> = capture
        .events_for_op("session_resolve")
        .into_iter()
        .filter(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field("request_id") == Some(request_id.as_str())
        })
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err_code"), Some("ERR_ENTITY_NOT_FOUND"));
}
