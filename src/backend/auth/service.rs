/**
 * Authentication Service
 *
 * The registration, login, refresh, logout and authentication flows. Each
 * operation validates its input, talks to the `UserStore`, `MediaUploader`
 * and `TokenService` collaborators, and returns either a value or an
 * `ApiError` carrying the status and client message.
 *
 * # Registration
 *
 * 1. All text fields required (400 `All fields are required`)
 * 2. Email pattern (400 `Invalid email`)
 * 3. Username or email already taken (409)
 * 4. Avatar present (400 `Avatar file is required`, nothing uploaded)
 * 5. Avatar upload (400 `Failed to upload avatar`); cover upload is best effort
 * 6. Insert with hashed password (409 if the unique constraint trips)
 * 7. Re-read the sanitized record (500 `error while registering user`)
 *
 * # Login
 *
 * 1. Identifier policy, then password presence (400)
 * 2. Lookup by username OR email (404 `Username or email is not registered`)
 * 3. bcrypt verify (401 `Incorrect password`)
 * 4. Issue and persist a token pair (500 `error while generating tokens`)
 * 5. Re-read the sanitized record, so it reflects the token write (500)
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::backend::auth::handlers::types::{LoginRequest, RegistrationForm};
use crate::backend::auth::sessions::{TokenError, TokenPair, TokenService};
use crate::backend::auth::users::{
    hash_password, verify_password, NewUser, PublicUser, UserStore,
};
use crate::backend::error::{ApiError, ApiResult, GENERIC_INTERNAL_MESSAGE};
use crate::backend::media::MediaUploader;
use crate::shared::error::ValidationError;
use crate::shared::validation::{non_blank, normalize_username, require_fields, validate_email};
use crate::shared::LoginIdentifierPolicy;

/// Client message when the post-insert lookup comes back empty
pub const REGISTRATION_FAILED: &str = "error while registering user";

/// A successful login: the sanitized user and the freshly issued tokens
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: PublicUser,
    pub tokens: TokenPair,
}

/// Registration and authentication flows
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    uploader: Arc<dyn MediaUploader>,
    tokens: TokenService,
    policy: LoginIdentifierPolicy,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        uploader: Arc<dyn MediaUploader>,
        tokens: TokenService,
        policy: LoginIdentifierPolicy,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            store,
            uploader,
            tokens,
            policy,
            bcrypt_cost,
        }
    }

    /// Register a new user from a decoded multipart form
    ///
    /// Staged files are owned by `form` and removed from disk when it drops,
    /// whichever way this returns.
    pub async fn register(&self, form: RegistrationForm) -> ApiResult<PublicUser> {
        require_fields(&[
            ("fullName", form.full_name.as_deref()),
            ("email", form.email.as_deref()),
            ("username", form.username.as_deref()),
            ("password", form.password.as_deref()),
        ])?;

        let full_name = non_blank(form.full_name.as_deref()).unwrap_or_default();
        let email = non_blank(form.email.as_deref()).unwrap_or_default();
        let username = normalize_username(non_blank(form.username.as_deref()).unwrap_or_default());
        let password = form.password.as_deref().unwrap_or_default();

        validate_email(email)?;

        if self
            .store
            .find_by_username_or_email(Some(&username), Some(email))
            .await?
            .is_some()
        {
            tracing::warn!(username = %username, "Registration rejected: identity taken");
            return Err(ApiError::conflict("User with this username or email already exists"));
        }

        let avatar_file = form
            .avatar
            .as_ref()
            .ok_or_else(|| ApiError::bad_request("Avatar file is required"))?;

        let avatar = match self.uploader.upload(Some(avatar_file)).await {
            Ok(Some(media)) => media.url,
            Ok(None) => return Err(ApiError::bad_request("Failed to upload avatar")),
            Err(err) => {
                tracing::warn!(error = %err, "Avatar upload failed");
                return Err(ApiError::bad_request("Failed to upload avatar"));
            }
        };

        let cover_image = match self.uploader.upload(form.cover_image.as_ref()).await {
            Ok(media) => media.map(|media| media.url).unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "Cover image upload failed, continuing without it");
                String::new()
            }
        };

        let password_hash = hash_password(password, self.bcrypt_cost)
            .await
            .map_err(|err| ApiError::internal_with(GENERIC_INTERNAL_MESSAGE, err))?;

        let created = self
            .store
            .create(NewUser {
                username,
                email: email.to_string(),
                full_name: full_name.to_string(),
                password_hash,
                avatar,
                cover_image,
            })
            .await?;

        let user = self
            .store
            .find_public_by_id(created.id)
            .await?
            .ok_or_else(|| ApiError::internal(REGISTRATION_FAILED))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue a token pair
    pub async fn login(&self, request: LoginRequest) -> ApiResult<LoginOutcome> {
        let username = non_blank(request.username.as_deref());
        let email = non_blank(request.email.as_deref());

        self.policy.check(username, email)?;

        let password = non_blank(request.password.as_deref())
            .and(request.password.as_deref())
            .ok_or(ValidationError::MissingPassword)?;

        let username = username.map(normalize_username);
        let user = self
            .store
            .find_by_username_or_email(username.as_deref(), email)
            .await?
            .ok_or_else(|| ApiError::not_found("Username or email is not registered"))?;

        let valid = verify_password(password, &user.password_hash)
            .await
            .map_err(|err| ApiError::internal_with(GENERIC_INTERNAL_MESSAGE, err))?;
        if !valid {
            tracing::warn!(user_id = %user.id, "Login rejected: incorrect password");
            return Err(ApiError::unauthorized("Incorrect password"));
        }

        let tokens = self.tokens.issue_for(user.id).await?;

        let logged_in = self
            .store
            .find_public_by_id(user.id)
            .await?
            .ok_or_else(|| ApiError::internal(GENERIC_INTERNAL_MESSAGE))?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
        Ok(LoginOutcome {
            user: logged_in,
            tokens,
        })
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The presented token must match the one stored on the user; once
    /// rotated, the previous token is rejected.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> ApiResult<TokenPair> {
        let refresh_token =
            non_blank(refresh_token).ok_or_else(|| ApiError::unauthorized("Unauthorized request"))?;

        let claims = self.tokens.verify_refresh_token(refresh_token).map_err(|err| {
            tracing::warn!(error = %err, "Refresh token rejected");
            ApiError::unauthorized("Invalid refresh token")
        })?;
        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            tracing::warn!(user_id = %user.id, "Refresh token does not match the stored one");
            return Err(ApiError::unauthorized("Refresh token is expired or used"));
        }

        let tokens = self
            .tokens
            .rotate(user.id, refresh_token)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user.id, "Refresh token rotated by a concurrent request");
                ApiError::unauthorized("Refresh token is expired or used")
            })?;
        tracing::info!(user_id = %user.id, "Access token refreshed");
        Ok(tokens)
    }

    /// Revoke the stored refresh token
    pub async fn logout(&self, user_id: Uuid) -> ApiResult<()> {
        self.store.set_refresh_token(user_id, None).await?;
        tracing::info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Resolve an access token to the user it names
    pub async fn authenticate(&self, access_token: &str) -> ApiResult<PublicUser> {
        let claims = self
            .tokens
            .verify_access_token(access_token)
            .inspect_err(|err: &TokenError| tracing::warn!(error = %err, "Access token rejected"))?;
        let user_id = claims.user_id()?;

        self.store
            .find_public_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid access token"))
    }
}
