//! Assertions on error responses

use axum::http::StatusCode;
use serde_json::Value;

/// Status matches and the body is the standard error shape
#[track_caller]
pub fn assert_error(actual: (StatusCode, Value), expected: StatusCode) -> Value {
    let (status, body) = actual;
    assert_eq!(status, expected, "unexpected status, body: {body}");
    assert_eq!(body["status"], expected.as_u16(), "body: {body}");
    assert!(body["error"].is_string(), "body: {body}");
    body
}

/// 400 with a message for `field`
#[track_caller]
pub fn assert_field_error(actual: (StatusCode, Value), field: &str) {
    let body = assert_error(actual, StatusCode::BAD_REQUEST);
    assert!(body["errors"][field].is_string(), "no error for {field}: {body}");
}
