/**
 * API Error Types
 *
 * This module defines the error taxonomy raised by handlers and services.
 * Every failure that reaches the HTTP boundary is one of these variants,
 * each carrying a status code and a client-facing message.
 *
 * # Error Categories
 *
 * - `BadRequest` (400) - malformed or missing input, missing or failed avatar upload
 * - `Unauthorized` (401) - bad credentials, missing or invalid tokens
 * - `NotFound` (404) - no matching identity, unknown route
 * - `MethodNotAllowed` (405) - known route, wrong method
 * - `Conflict` (409) - duplicate username or email
 * - `PayloadTooLarge` (413) - body over the route's limit
 * - `Internal` (500) - token generation, persistence and unexpected faults
 *
 * `Internal` keeps its cause for server-side logging only; the cause is
 * never rendered into the response body.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Boxed cause attached to internal errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Generic message for internal failures whose detail must stay server-side
pub const GENERIC_INTERNAL_MESSAGE: &str = "Something went wrong";

/// API error taxonomy
///
/// # Usage
///
/// ```rust
/// use userauth::backend::error::ApiError;
/// use axum::http::StatusCode;
///
/// let err = ApiError::conflict("User with this username or email already exists");
/// assert_eq!(err.status_code(), StatusCode::CONFLICT);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing client input
    #[error("Bad request: {message}")]
    BadRequest {
        /// Human-readable error message
        message: String,
        /// Optional per-field details
        errors: Vec<String>,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// No matching resource
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Route exists but not for this method
    #[error("Method not allowed: {message}")]
    MethodNotAllowed {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate identity
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Request body exceeds the route's limit
    #[error("Payload too large: {message}")]
    PayloadTooLarge {
        /// Human-readable error message
        message: String,
    },

    /// Server-side failure
    #[error("Internal error: {message}")]
    Internal {
        /// Message shown to the client
        message: String,
        /// Underlying cause, logged but never rendered
        #[source]
        source: Option<BoxError>,
    },
}

impl ApiError {
    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::PayloadTooLarge {
            message: message.into(),
        }
    }

    /// Create a new internal error without a cause
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new internal error that keeps its cause for logging
    pub fn internal_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Attach detail lines to a bad request error
    ///
    /// Other variants are returned unchanged.
    pub fn with_errors(self, details: Vec<String>) -> Self {
        match self {
            Self::BadRequest { message, .. } => Self::BadRequest {
                message,
                errors: details,
            },
            other => other,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing message
    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. }
            | Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::MethodNotAllowed { message }
            | Self::Conflict { message }
            | Self::PayloadTooLarge { message }
            | Self::Internal { message, .. } => message.as_str(),
        }
    }

    /// Get the detail lines for the failure envelope
    pub fn errors(&self) -> &[String] {
        match self {
            Self::BadRequest { errors, .. } => errors,
            _ => &[],
        }
    }
}
