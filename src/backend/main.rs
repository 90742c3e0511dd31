/**
 * User Auth Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the configuration, connects to
 * the database and serves the API.
 */

use tracing_subscriber::EnvFilter;

use userauth::backend::server::{config::AppConfig, create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env().map_err(|err| {
        tracing::error!(error = %err, "Invalid configuration");
        err
    })?;
    let port = config.port;

    let app = create_app(config).await.map_err(|err| {
        tracing::error!(error = %err, "Database connection failed");
        err
    })?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running at port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
