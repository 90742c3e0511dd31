//! Authentication Module
//!
//! This module handles user registration, login and the session token
//! lifecycle.
//!
//! # Architecture
//!
//! - **`users`** - User model, `UserStore` port and PostgreSQL store, password hashing
//! - **`sessions`** - Access/refresh JWT issuance, verification and persistence
//! - **`service`** - `AuthService` with the register/login/refresh/logout flows
//! - **`handlers`** - HTTP handlers for the `/api/v1/users` endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and persistence
//! ├── sessions.rs     - JWT token management
//! ├── service.rs      - Authentication flows
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Token Lifecycle
//!
//! 1. **Login**: credentials verified, new pair issued, refresh token stored
//! 2. **Refresh**: presented refresh token must equal the stored one; a new
//!    pair replaces it
//! 3. **Logout**: stored refresh token cleared
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Access and refresh tokens are signed with separate secrets
//! - A single refresh token is active per user
//! - `PublicUser` carries no password or refresh token

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Registration and authentication flows
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{LoginRequest, RegistrationForm};
pub use service::{AuthService, LoginOutcome};
pub use sessions::{TokenConfig, TokenPair, TokenService};
pub use users::{PgUserStore, PublicUser, User, UserStore};
