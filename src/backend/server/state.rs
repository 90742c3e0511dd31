/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds only immutable, cheaply clonable handles:
 * - the loaded `AppConfig`
 * - the `AuthService`, which owns the user store, media uploader and
 *   token service
 *
 * There is no shared mutable in-process state; everything mutable lives in
 * the database.
 *
 * # Example
 *
 * ```rust,no_run
 * use userauth::backend::auth::service::AuthService;
 * use axum::extract::State;
 *
 * async fn handler(State(auth): State<AuthService>) {
 *     // Use the service
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::service::AuthService;
use crate::backend::server::config::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: Arc<AppConfig>,

    /// Registration and authentication flows
    pub auth: AuthService,
}

impl AppState {
    pub fn new(config: AppConfig, auth: AuthService) -> Self {
        Self {
            config: Arc::new(config),
            auth,
        }
    }
}

/// Implement FromRef for AuthService
///
/// This allows handlers to take `State(auth): State<AuthService>` directly.
impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

/// Implement FromRef for the shared configuration
impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
