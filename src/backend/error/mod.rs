//! Backend Error Module
//!
//! The request pipeline's failure side. Handlers and services raise
//! `ApiError`; the `IntoResponse` impl in `conversion` is the only place a
//! failure envelope is written.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError taxonomy and constructors
//! └── conversion.rs - IntoResponse, From impls, panic, 404 and 405 handlers
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use userauth::backend::error::ApiError;
//!
//! async fn handler() -> Result<&'static str, ApiError> {
//!     Err(ApiError::not_found("Username or email is not registered"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::{method_not_allowed, panic_response, route_not_found, BODY_TOO_LARGE_MESSAGE};
pub use types::{ApiError, BoxError, GENERIC_INTERNAL_MESSAGE};

/// Result alias used by handlers and services
pub type ApiResult<T> = Result<T, ApiError>;
