/**
 * API Route Handlers
 *
 * This module defines the user endpoints, mounted under `/api/v1/users`.
 *
 * # Routes
 *
 * ## Public
 * - `POST /register` - Multipart registration with avatar upload
 * - `POST /login` - Credential login, sets token cookies
 * - `POST /refresh-token` - Rotate the token pair
 *
 * ## Authenticated
 * - `POST /logout` - Revoke the refresh token, clear cookies
 * - `GET /current-user` - Sanitized current user
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{current_user, login, logout, refresh_access_token, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Body cap for JSON endpoints
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Configure the user routes
///
/// The registration route accepts bodies up to `UPLOAD_MAX_BYTES`; the JSON
/// routes are capped at `JSON_BODY_LIMIT`. Authenticated routes are wrapped
/// in `auth_middleware`.
pub fn configure_user_routes(app_state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/logout", post(logout))
        .route("/current-user", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route(
            "/register",
            post(register).layer(DefaultBodyLimit::max(app_state.config.upload_max_bytes)),
        )
        .route(
            "/login",
            post(login).layer(DefaultBodyLimit::max(JSON_BODY_LIMIT)),
        )
        .route(
            "/refresh-token",
            post(refresh_access_token).layer(DefaultBodyLimit::max(JSON_BODY_LIMIT)),
        )
        .merge(authenticated)
}
