//! User Auth - Registration and Authentication Backend
//!
//! An Axum service that registers users (with an avatar uploaded to a media
//! host), logs them in, and manages their access/refresh token pair.
//!
//! # Module Structure
//!
//! - **`shared`** - Response envelopes, validation rules, validation errors
//! - **`backend`** - Server, routes, auth flows, media upload, middleware
//!
//! # Endpoints
//!
//! All under `/api/v1/users`:
//!
//! - `POST /register` - multipart form with `avatar` and optional `coverImage`
//! - `POST /login` - JSON credentials, sets `accessToken`/`refreshToken` cookies
//! - `POST /refresh-token` - rotate the token pair
//! - `POST /logout` - revoke the refresh token
//! - `GET /current-user` - the signed-in user
//!
//! # Feature Flags
//!
//! - **`test-support`** - exposes `backend::test_support` (in-memory store
//!   and stub uploader) to integration tests
//!
//! # Usage
//!
//! ```rust,no_run
//! use userauth::backend::server::{config::AppConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
