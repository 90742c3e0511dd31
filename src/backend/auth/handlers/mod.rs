//! Authentication Handlers
//!
//! HTTP handlers for the `/api/v1/users` endpoints. Handlers only decode
//! requests and encode envelopes; the flows themselves live in
//! `AuthService`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Handler exports
//! ├── types.rs        - Request/response types, ApiJson extractor
//! ├── cookies.rs      - Token cookie helpers
//! ├── register.rs     - POST /register (multipart)
//! ├── login.rs        - POST /login
//! ├── refresh.rs      - POST /refresh-token
//! ├── logout.rs       - POST /logout (authenticated)
//! └── current_user.rs - GET /current-user (authenticated)
//! ```

/// Request and response types
pub mod types;

/// Token cookie helpers
pub mod cookies;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Token refresh handler
pub mod refresh;

/// Logout handler
pub mod logout;

/// Current user handler
pub mod current_user;

pub use current_user::current_user;
pub use login::login;
pub use logout::logout;
pub use refresh::refresh_access_token;
pub use register::register;
