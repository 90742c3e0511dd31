//! Response Envelopes
//!
//! Every handler outcome is normalized into one of two JSON shapes:
//!
//! ```json
//! { "status": 201, "data": { ... }, "message": "...", "success": true }
//! { "status": 409, "message": "...", "success": false, "errors": [] }
//! ```
//!
//! `success` is derived from the status code, so a caller can never build
//! an envelope whose flag disagrees with its status.

use serde::{Deserialize, Serialize};

/// Success envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// Status code reported in the body
    pub status: u16,
    /// Response payload
    pub data: T,
    /// Human-readable message
    pub message: String,
    /// `true` when `status < 400`
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Create a new success envelope
    pub fn new(status: u16, data: T, message: impl Into<String>) -> Self {
        Self {
            status,
            data,
            message: message.into(),
            success: status < 400,
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiFailure {
    /// Status code reported in the body
    pub status: u16,
    /// Human-readable message
    pub message: String,
    /// Always `false` for error statuses
    pub success: bool,
    /// Optional detail lines
    pub errors: Vec<String>,
}

impl ApiFailure {
    /// Create a new failure envelope
    pub fn new(status: u16, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            status,
            message: message.into(),
            success: status < 400,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ApiResponse::new(201, json!({ "username": "alice" }), "created");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "status": 201,
                "data": { "username": "alice" },
                "message": "created",
                "success": true
            })
        );
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = ApiFailure::new(409, "taken", vec![]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "status": 409, "message": "taken", "success": false, "errors": [] })
        );
    }
}
