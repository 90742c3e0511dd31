/**
 * Router Configuration
 *
 * This module assembles the application router and wraps it in the request
 * pipeline shared by every route.
 *
 * # Route Order
 *
 * 1. API routes (`/api/v1/users/...`)
 * 2. Static files (`/static` from `public/`)
 * 3. Fallback (404 failure envelope)
 *
 * A known API path called with the wrong method gets a 405 failure envelope.
 *
 * # Pipeline
 *
 * Outermost first:
 * 1. `TraceLayer` - request/response logging
 * 2. `CorsLayer` - credentialed CORS for the configured origin
 * 3. `CatchPanicLayer` - a panicking handler becomes a 500 envelope
 */

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::error::{method_not_allowed, panic_response, route_not_found};
use crate::backend::routes::api_routes::configure_user_routes;
use crate::backend::server::state::AppState;

/// Directory served under `/static`
pub const STATIC_DIR: &str = "public";

/// Create the Axum router with all routes and the request pipeline
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors_origin = app_state.config.cors_origin.clone();

    let router = Router::new()
        .nest("/api/v1/users", configure_user_routes(&app_state))
        .method_not_allowed_fallback(method_not_allowed)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(route_not_found)
        .with_state(app_state);

    with_pipeline(router, &cors_origin)
}

/// Wrap a router in the tracing, CORS and panic-recovery layers
pub fn with_pipeline(router: Router<()>, cors_origin: &str) -> Router<()> {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer
///
/// Credentials are allowed, which rules out a literal `*`; a configured `*`
/// mirrors the caller's origin instead. Otherwise the value is a
/// comma-separated list of exact origins.
pub fn cors_layer(cors_origin: &str) -> CorsLayer {
    let allow_origin = if cors_origin.trim() == "*" {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = cors_origin
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
