//! Server Module
//!
//! Server-side setup: configuration, shared state and app construction.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - AppConfig from the environment, database connection
//! └── init.rs         - App construction
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env()`
//! 2. **Database**: connect and migrate, aborting startup on failure
//! 3. **Services**: user store, media uploader, token and auth services
//! 4. **Router Creation**: routes plus the request pipeline
//!
//! # Example
//!
//! ```rust,no_run
//! use userauth::backend::server::{config::AppConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{AppConfig, ConfigError};
pub use init::create_app;
pub use state::AppState;
