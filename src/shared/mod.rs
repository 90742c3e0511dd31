//! Shared Module
//!
//! Types that sit on the contract between business logic and the HTTP
//! boundary: the response envelopes every handler emits, the validation
//! errors raised by input checks, and the validation rules themselves.
//!
//! Nothing in here depends on axum or the database, so the rules can be
//! exercised directly in unit tests.

/// Success and failure response envelopes
pub mod response;

/// Validation error types
pub mod error;

/// Input validation rules (required fields, email pattern, login policy)
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::ValidationError;
pub use response::{ApiFailure, ApiResponse};
pub use validation::LoginIdentifierPolicy;
