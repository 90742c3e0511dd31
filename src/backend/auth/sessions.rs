/**
 * Session Tokens
 *
 * This module issues and verifies the two JWTs that make up a session:
 *
 * - the access token, short-lived, carrying identity claims; never persisted
 * - the refresh token, longer-lived, persisted on the user record so it can
 *   be rotated or revoked
 *
 * Both are HS256 with independent secrets and lifetimes taken from
 * `TokenConfig`, which is handed in at construction. Nothing here reads the
 * environment.
 *
 * Each token carries a random `jti`, so two tokens minted for the same user
 * within the same second still differ.
 */

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::users::{StoreError, User, UserStore};
use crate::backend::error::ApiError;

/// Client-facing message for any failure while minting a token pair
pub const TOKEN_GENERATION_FAILED: &str = "error while generating tokens";

/// Secrets and lifetimes for both token types
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub access_ttl: Duration,
    pub refresh_secret: String,
    pub refresh_ttl: Duration,
}

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Token ID
    pub jti: String,
}

/// Claims embedded in a refresh token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
    pub jti: String,
}

/// Parse a `sub` claim into a user ID
fn subject_id(sub: &str) -> Result<Uuid, TokenError> {
    Uuid::parse_str(sub).map_err(|_| TokenError::Invalid)
}

impl AccessClaims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        subject_id(&self.sub)
    }
}

impl RefreshClaims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        subject_id(&self.sub)
    }
}

/// Freshly issued access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("token encoding failed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

/// Failures while minting and persisting a token pair
///
/// Never shown to clients; logged as the cause of a 500.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("no user with id {0}")]
    UnknownUser(Uuid),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Issues, verifies and persists session tokens
#[derive(Clone)]
pub struct TokenService {
    config: Arc<TokenConfig>,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    store: Arc<dyn UserStore>,
}

impl TokenService {
    pub fn new(config: TokenConfig, store: Arc<dyn UserStore>) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            config: Arc::new(config),
            store,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }

    /// Create an access token for a user
    pub fn generate_access_token(&self, user: &User) -> Result<String, TokenError> {
        let now = get_current_timestamp();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            iat: now,
            exp: now + self.config.access_ttl.as_secs(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(TokenError::Encoding)
    }

    /// Create a refresh token for a user
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, TokenError> {
        let now = get_current_timestamp();
        let claims = RefreshClaims {
            sub: user.id.to_string(),
            iat: now,
            exp: now + self.config.refresh_ttl.as_secs(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(TokenError::Encoding)
    }

    /// Verify and decode an access token
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &Self::validation())?;
        Ok(data.claims)
    }

    /// Verify and decode a refresh token
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &Self::validation())?;
        Ok(data.claims)
    }

    /// Mint a new pair for a user and persist the refresh token
    ///
    /// The stored refresh token is overwritten, leaving one active refresh
    /// token per user. Any failure is a 500 with a fixed message; the cause
    /// is only logged.
    pub async fn issue_for(&self, user_id: Uuid) -> Result<TokenPair, ApiError> {
        self.try_issue(user_id)
            .await
            .map_err(|err| ApiError::internal_with(TOKEN_GENERATION_FAILED, err))
    }

    /// Mint a new pair in place of `presented`
    ///
    /// The stored token is swapped only if it still equals `presented`, so
    /// of two concurrent rotations with the same token exactly one wins.
    /// `Ok(None)` is the losing side.
    pub async fn rotate(&self, user_id: Uuid, presented: &str) -> Result<Option<TokenPair>, ApiError> {
        self.try_rotate(user_id, presented)
            .await
            .map_err(|err| ApiError::internal_with(TOKEN_GENERATION_FAILED, err))
    }

    async fn try_issue(&self, user_id: Uuid) -> Result<TokenPair, IssueError> {
        let pair = self.mint(user_id).await?;
        self.store
            .set_refresh_token(user_id, Some(&pair.refresh_token))
            .await?;

        tracing::debug!(user_id = %user_id, "Issued token pair");
        Ok(pair)
    }

    async fn try_rotate(&self, user_id: Uuid, presented: &str) -> Result<Option<TokenPair>, IssueError> {
        let pair = self.mint(user_id).await?;
        let replaced = self
            .store
            .replace_refresh_token(user_id, presented, &pair.refresh_token)
            .await?;

        if !replaced {
            return Ok(None);
        }
        tracing::debug!(user_id = %user_id, "Rotated token pair");
        Ok(Some(pair))
    }

    async fn mint(&self, user_id: Uuid) -> Result<TokenPair, IssueError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(IssueError::UnknownUser(user_id))?;

        Ok(TokenPair {
            access_token: self.generate_access_token(&user)?,
            refresh_token: self.generate_refresh_token(&user)?,
        })
    }
}
