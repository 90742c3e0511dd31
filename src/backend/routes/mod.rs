//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly and request pipeline
//! └── api_routes.rs   - /api/v1/users endpoints
//! ```
//!
//! # Routes
//!
//! - `POST /api/v1/users/register` - User registration (multipart)
//! - `POST /api/v1/users/login` - User login
//! - `POST /api/v1/users/refresh-token` - Token rotation
//! - `POST /api/v1/users/logout` - Logout (authenticated)
//! - `GET /api/v1/users/current-user` - Current user (authenticated)
//! - `GET /static/*` - Files from `public/`
//!
//! Anything else falls through to a 404 failure envelope.

/// Router assembly and pipeline
pub mod router;

/// User API routes
pub mod api_routes;

pub use router::{create_router, with_pipeline};
