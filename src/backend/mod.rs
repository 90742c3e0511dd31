//! Backend Module
//!
//! All server-side code: an Axum HTTP server for user registration and
//! authentication.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app construction
//! - **`routes`** - Route configuration and the request pipeline
//! - **`auth`** - Users, tokens, authentication flows and handlers
//! - **`media`** - Upload staging and the Cloudinary client
//! - **`middleware`** - Access-token authentication
//! - **`error`** - `ApiError` and its conversion to failure envelopes
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── media/          - Media uploads
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the loaded configuration and the `AuthService`. There
//! is no in-process mutable state shared between requests; user records
//! and refresh tokens live in PostgreSQL, whose unique constraints settle
//! concurrent registrations of the same identity.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`. Every failure, including a
//! panicking handler, reaches the client as the failure envelope.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Media upload staging and hosting
pub mod media;

/// Middleware for request processing
pub mod middleware;

/// In-memory collaborators for tests
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::{ApiError, ApiResult};
pub use server::create_app;
