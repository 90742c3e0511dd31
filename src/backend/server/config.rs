/**
 * Server Configuration
 *
 * This module loads the application configuration from environment variables
 * and opens the PostgreSQL pool.
 *
 * # Configuration Sources
 *
 * `AppConfig::from_env()` is called once, from the binary, after `.env` has
 * been loaded. Everything below it (services, handlers, middleware) receives
 * the resulting struct; nothing else reads the environment.
 *
 * | Variable                  | Default          |
 * |---------------------------|------------------|
 * | `PORT`                    | `8000`           |
 * | `CORS_ORIGIN`             | `*`              |
 * | `DATABASE_URL`            | required         |
 * | `DB_NAME`                 | `authdb`         |
 * | `ACCESS_TOKEN_SECRET`     | required         |
 * | `ACCESS_TOKEN_EXPIRY`     | `1d`             |
 * | `REFRESH_TOKEN_SECRET`    | required         |
 * | `REFRESH_TOKEN_EXPIRY`    | `10d`            |
 * | `CLOUDINARY_CLOUD_NAME`   | required         |
 * | `CLOUDINARY_API_KEY`      | required         |
 * | `CLOUDINARY_API_SECRET`   | required         |
 * | `CLOUDINARY_BASE_URL`     | Cloudinary API   |
 * | `UPLOAD_TEMP_DIR`         | `./public/temp`  |
 * | `UPLOAD_MAX_BYTES`        | `10485760`       |
 * | `BCRYPT_COST`             | bcrypt default   |
 * | `LOGIN_IDENTIFIER_POLICY` | `both`           |
 *
 * # Error Handling
 *
 * A missing or malformed value is a `ConfigError`. Unlike optional
 * services, the database is mandatory: `connect_database` failing aborts
 * startup.
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;

use crate::backend::auth::sessions::TokenConfig;
use crate::backend::media::CloudinaryConfig;
use crate::shared::LoginIdentifierPolicy;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default database name appended to the connection URI
pub const DEFAULT_DB_NAME: &str = "authdb";

/// Default cap on a registration request body
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Lowest bcrypt cost accepted for `BCRYPT_COST`
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt cost accepted for `BCRYPT_COST`
pub const MAX_BCRYPT_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Allowed CORS origin, or `*` to mirror the caller's origin
    pub cors_origin: String,
    pub database_url: String,
    pub database_name: String,
    pub tokens: TokenConfig,
    pub cloudinary: CloudinaryConfig,
    /// Where multipart uploads are staged before going to the media host
    pub upload_temp_dir: PathBuf,
    pub upload_max_bytes: usize,
    pub bcrypt_cost: u32,
    pub login_policy: LoginIdentifierPolicy,
}

fn var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    var(key).ok_or(ConfigError::Missing(key))
}

fn parsed<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Some(raw) => raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

fn duration(key: &'static str, default: &str) -> Result<Duration, ConfigError> {
    let raw = var(key).unwrap_or_else(|| default.to_string());
    parse_duration(&raw).map_err(|reason| ConfigError::Invalid { key, reason })
}

/// Parse a lifetime such as `15m`, `1d` or `3600`
///
/// Accepted units are `s`, `m`, `h` and `d`; a bare number is seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.char_indices().last() {
        Some((idx, 's')) => (&raw[..idx], 1),
        Some((idx, 'm')) => (&raw[..idx], 60),
        Some((idx, 'h')) => (&raw[..idx], 60 * 60),
        Some((idx, 'd')) => (&raw[..idx], 24 * 60 * 60),
        Some(_) => (raw, 1),
        None => return Err("empty duration".to_string()),
    };

    let amount: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a duration (expected e.g. 30s, 15m, 1h, 10d)"))?;

    amount
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("'{raw}' is too large"))
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let tokens = TokenConfig {
            access_secret: required("ACCESS_TOKEN_SECRET")?,
            access_ttl: duration("ACCESS_TOKEN_EXPIRY", "1d")?,
            refresh_secret: required("REFRESH_TOKEN_SECRET")?,
            refresh_ttl: duration("REFRESH_TOKEN_EXPIRY", "10d")?,
        };

        let mut cloudinary = CloudinaryConfig::new(
            required("CLOUDINARY_CLOUD_NAME")?,
            required("CLOUDINARY_API_KEY")?,
            required("CLOUDINARY_API_SECRET")?,
        );
        if let Some(base_url) = var("CLOUDINARY_BASE_URL") {
            cloudinary = cloudinary.with_base_url(base_url);
        }

        let bcrypt_cost = parsed("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!("{bcrypt_cost} is outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}"),
            });
        }

        Ok(Self {
            port: parsed("PORT", DEFAULT_PORT)?,
            cors_origin: var("CORS_ORIGIN").unwrap_or_else(|| "*".to_string()),
            database_url: required("DATABASE_URL")?,
            database_name: var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            tokens,
            cloudinary,
            upload_temp_dir: var("UPLOAD_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./public/temp")),
            upload_max_bytes: parsed("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?,
            bcrypt_cost,
            login_policy: parsed("LOGIN_IDENTIFIER_POLICY", LoginIdentifierPolicy::default())?,
        })
    }
}

/// Connect to PostgreSQL and run pending migrations
///
/// `DATABASE_URL` names the server; `DB_NAME` selects the database on it.
/// Any failure here is fatal to startup.
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.database_url)?.database(&config.database_name);

    tracing::info!(database = %config.database_name, "Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
