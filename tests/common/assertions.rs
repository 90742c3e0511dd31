//! Envelope assertions
//!
//! Helpers that check a response against the success and failure envelope
//! shapes with descriptive panic messages.

use axum::http::StatusCode;

use super::app::TestResponse;

/// Assert a failure envelope with the given status and message
pub fn assert_failure(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(
        response.status, status,
        "unexpected status, body: {:?}",
        response.body
    );
    assert_eq!(response.body["status"], status.as_u16(), "body: {:?}", response.body);
    assert_eq!(response.body["success"], false, "body: {:?}", response.body);
    assert_eq!(response.message(), message, "body: {:?}", response.body);
    assert!(
        response.body["errors"].is_array(),
        "failure envelope must carry an errors array: {:?}",
        response.body
    );
}

/// Assert a success envelope and return its `data`
pub fn assert_success<'a>(
    response: &'a TestResponse,
    http_status: StatusCode,
    envelope_status: u16,
    message: &str,
) -> &'a serde_json::Value {
    assert_eq!(
        response.status, http_status,
        "unexpected status, body: {:?}",
        response.body
    );
    assert_eq!(response.body["status"], envelope_status, "body: {:?}", response.body);
    assert_eq!(response.body["success"], true, "body: {:?}", response.body);
    assert_eq!(response.message(), message, "body: {:?}", response.body);
    &response.body["data"]
}

/// Assert that a user payload carries no secret fields
pub fn assert_sanitized(user: &serde_json::Value) {
    let object = user.as_object().expect("user payload must be an object");
    for secret in ["password", "passwordHash", "password_hash", "refreshToken", "refresh_token"] {
        assert!(
            !object.contains_key(secret),
            "user payload leaked `{secret}`: {user:?}"
        );
    }
}
