/**
 * User Model and Persistence
 *
 * This module defines the persisted user record, its sanitized public view,
 * and the `UserStore` port with its PostgreSQL implementation.
 *
 * `User` carries the password hash and refresh token and is never
 * serialized. `PublicUser` is the only shape that leaves the server; it has
 * no secret fields at all, so no serializer setting can leak them.
 *
 * Uniqueness of `username` and `email` is enforced by the database (see
 * `migrations/`); an insert that trips the constraint surfaces as
 * `StoreError::Duplicate`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// User record as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Lowercased, unique username
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Hosted avatar URL (never empty)
    pub avatar: String,
    /// Hosted cover image URL, or empty string
    pub cover_image: String,
    /// Currently valid refresh token, if any
    pub refresh_token: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Sanitized user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            cover_image: user.cover_image,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fields required to insert a user
///
/// The password is already hashed; `UserStore::create` never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password_hash: String,
    pub avatar: String,
    pub cover_image: String,
}

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint on username or email violated
    #[error("username or email already exists")]
    Duplicate,

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::Duplicate,
            _ => StoreError::Database(err),
        }
    }
}

/// Persistence port for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find the first user whose username OR email matches
    ///
    /// `None` identifiers are ignored; if both are `None` nothing matches.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError>;

    /// Find a user by ID, secrets included
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Find a user by ID as a sanitized record
    async fn find_public_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, StoreError>;

    /// Insert a new user
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Overwrite (or clear) the stored refresh token
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError>;

    /// Swap the stored refresh token for `next` only while it still equals
    /// `current`
    ///
    /// Returns `false` when the token was already rotated or revoked.
    async fn replace_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed `UserStore`
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, username, email, full_name, password_hash, avatar, cover_image, \
                            refresh_token, created_at, updated_at";

const PUBLIC_USER_COLUMNS: &str =
    "id, username, email, full_name, avatar, cover_image, created_at, updated_at";

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $2 ORDER BY created_at LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_public_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, StoreError> {
        let sql = format!("SELECT {PUBLIC_USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, PublicUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let sql = format!(
            r#"
            INSERT INTO users (id, username, email, full_name, password_hash, avatar, cover_image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.full_name)
            .bind(&new_user.password_hash)
            .bind(&new_user.avatar)
            .bind(&new_user.cover_image)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET refresh_token = $1, updated_at = $2 WHERE id = $3")
            .bind(token)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = $1, updated_at = $2 WHERE id = $3 AND refresh_token = $4",
        )
        .bind(next)
        .bind(Utc::now())
        .bind(id)
        .bind(current)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Hash a plaintext password with bcrypt off the async executor
pub async fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Verify a plaintext password against a bcrypt hash off the async executor
pub async fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash)).await??;
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::MIN_BCRYPT_COST;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice A".into(),
            password_hash: "$2b$04$hash".into(),
            avatar: "https://media.example/avatar.png".into(),
            cover_image: String::new(),
            refresh_token: Some("refresh".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_user_has_no_secret_fields() {
        let public = PublicUser::from(sample_user());
        let value = serde_json::to_value(&public).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("refreshToken"));
        assert_eq!(object["fullName"], "Alice A");
        assert_eq!(object["coverImage"], "");
    }

    #[tokio::test]
    async fn test_hash_and_verify_password() {
        let hash = hash_password("secret1", MIN_BCRYPT_COST).await.unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash).await.unwrap());
        assert!(!verify_password("secret2", &hash).await.unwrap());
    }
}
