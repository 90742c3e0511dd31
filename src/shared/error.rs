//! Validation Error Types
//!
//! Errors produced while checking client input, before any persistence or
//! external call happens. Every variant is a client fault and ends up as a
//! `400 Bad Request` failure envelope.
//!
//! # Usage
//!
//! ```rust
//! use userauth::shared::error::ValidationError;
//!
//! let error = ValidationError::missing_fields(["email"]);
//! assert_eq!(error.to_string(), "All fields are required");
//! ```
use thiserror::Error;

/// Input validation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required text fields are absent or blank
    #[error("All fields are required")]
    MissingFields {
        /// Names of the offending fields, in form order
        fields: Vec<String>,
    },

    /// The email does not match the accepted pattern
    #[error("Invalid email")]
    InvalidEmail,

    /// The login identifiers required by the active policy are absent
    #[error("username or email is required")]
    MissingIdentifier,

    /// The login password is absent or blank
    #[error("password is required")]
    MissingPassword,
}

impl ValidationError {
    /// Create a missing-fields error from field names
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Per-field detail lines for the `errors` array of the failure envelope
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::MissingFields { fields } => fields
                .iter()
                .map(|field| format!("{field} is required"))
                .collect(),
            _ => Vec::new(),
        }
    }
}
