/**
 * Server Initialization
 *
 * This module wires the production collaborators together and builds the
 * router.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations (fatal on failure)
 * 2. Build the user store, Cloudinary uploader and token service
 * 3. Assemble `AppState` and the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::{PgUserStore, UserStore};
use crate::backend::media::{CloudinaryUploader, MediaUploader};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, AppConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the database is unreachable or migrations do not apply.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing user auth backend");

    let pool = connect_database(&config).await?;

    let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
    let uploader: Arc<dyn MediaUploader> =
        Arc::new(CloudinaryUploader::new(config.cloudinary.clone()));
    let tokens = TokenService::new(config.tokens.clone(), store.clone());
    let auth = AuthService::new(
        store,
        uploader,
        tokens,
        config.login_policy,
        config.bcrypt_cost,
    );

    let app = create_router(AppState::new(config, auth));
    tracing::info!("Router configured");

    Ok(app)
}
