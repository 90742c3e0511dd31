/**
 * Error Conversion
 *
 * This module is the single point where failures become HTTP responses.
 * `ApiError` implements `IntoResponse`, so handlers return
 * `Result<_, ApiError>` and never build failure bodies themselves.
 *
 * Component errors (`ValidationError`, `StoreError`, `TokenError`) and axum
 * extractor rejections convert into `ApiError` with `From`, which lets `?`
 * carry them up to the boundary. A rejection caused by the body limit keeps
 * its 413 status; any other rejection is a 400.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "status": 400,
 *   "message": "All fields are required",
 *   "success": false,
 *   "errors": ["email is required"]
 * }
 * ```
 */

use std::any::Any;

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::sessions::{TokenError, TOKEN_GENERATION_FAILED};
use crate::backend::auth::users::StoreError;
use crate::backend::error::types::{ApiError, GENERIC_INTERNAL_MESSAGE};
use crate::shared::{ApiFailure, ValidationError};

impl IntoResponse for ApiError {
    /// Convert an API error into the failure envelope
    ///
    /// Internal errors are logged with their cause at `error` level; client
    /// faults are logged at `warn`. The cause never reaches the body.
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Internal { message, source } => {
                tracing::error!(status = status.as_u16(), cause = ?source, "{}", message);
            }
            other => {
                tracing::warn!(status = status.as_u16(), "{}", other.message());
            }
        }

        let body = ApiFailure::new(status.as_u16(), self.message(), self.errors().to_vec());
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let details = err.details();
        ApiError::bad_request(err.to_string()).with_errors(details)
    }
}

/// Message for a body rejected by `DefaultBodyLimit`
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";

fn body_rejection(status: StatusCode, message: &str, detail: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(BODY_TOO_LARGE_MESSAGE)
    } else {
        ApiError::bad_request(message).with_errors(vec![detail])
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        body_rejection(rejection.status(), "Invalid JSON body", rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        body_rejection(rejection.status(), "Invalid request body", rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        body_rejection(rejection.status(), "Invalid multipart form", rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        body_rejection(err.status(), "Invalid multipart form", err.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => {
                ApiError::conflict("User with this username or email already exists")
            }
            other => ApiError::internal_with(GENERIC_INTERNAL_MESSAGE, other),
        }
    }
}

/// Verification failures are the caller's fault; encoding failures are ours
impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => {
                ApiError::unauthorized("Invalid access token")
            }
            TokenError::Encoding(_) => ApiError::internal_with(TOKEN_GENERATION_FAILED, err),
        }
    }
}

/// Render a caught handler panic as a 500 failure envelope
///
/// Installed through `CatchPanicLayer::custom`. The panic payload is logged
/// and replaced by a generic message.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::internal(GENERIC_INTERNAL_MESSAGE).into_response()
}

/// Fallback for unknown routes
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Fallback for a known route called with the wrong method
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}
