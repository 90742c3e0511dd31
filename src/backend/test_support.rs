//! In-memory collaborators for tests
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration tests under `tests/`.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::auth::sessions::{TokenConfig, TokenService};
use crate::backend::auth::service::AuthService;
use crate::backend::auth::users::{NewUser, PublicUser, StoreError, User, UserStore};
use crate::backend::media::{CloudinaryConfig, MediaUploader, StagedFile, UploadError, UploadedMedia};
use crate::backend::server::config::{AppConfig, MIN_BCRYPT_COST};
use crate::backend::server::state::AppState;
use crate::shared::LoginIdentifierPolicy;

/// `UserStore` backed by a vector, enforcing the same uniqueness rules as
/// the database
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    hide_public: AtomicBool,
}

impl MemoryUserStore {
    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Make `find_public_by_id` return nothing, simulating a record that
    /// vanished between insert and re-read
    pub fn hide_public_lookups(&self, hide: bool) {
        self.hide_public.store(hide, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().await;
        let found = users.iter().find(|user| {
            username.is_some_and(|name| user.username == name)
                || email.is_some_and(|mail| user.email == mail)
        });
        Ok(found.cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_public_by_id(&self, id: Uuid) -> Result<Option<PublicUser>, StoreError> {
        if self.hide_public.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.find_by_id(id).await?.map(PublicUser::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().await;
        if users
            .iter()
            .any(|user| user.username == new_user.username || user.email == new_user.email)
        {
            return Err(StoreError::Duplicate);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            full_name: new_user.full_name,
            password_hash: new_user.password_hash,
            avatar: new_user.avatar,
            cover_image: new_user.cover_image,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), StoreError> {
        let mut users = self.users.lock().await;
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.refresh_token = token.map(str::to_owned);
            user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn replace_refresh_token(
        &self,
        id: Uuid,
        current: &str,
        next: &str,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.lock().await;
        match users
            .iter_mut()
            .find(|user| user.id == id && user.refresh_token.as_deref() == Some(current))
        {
            Some(user) => {
                user.refresh_token = Some(next.to_owned());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// `MediaUploader` that hands back `https://media.test/<file name>`
#[derive(Default)]
pub struct StubUploader {
    calls: AtomicUsize,
    fail_all: bool,
    fail_name: Option<String>,
}

impl StubUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every upload
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Reject uploads of one file name only
    pub fn failing_for(file_name: impl Into<String>) -> Self {
        Self {
            fail_name: Some(file_name.into()),
            ..Self::default()
        }
    }

    /// Number of upload attempts so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for StubUploader {
    async fn upload_file(&self, file: &StagedFile) -> Result<UploadedMedia, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all || self.fail_name.as_deref() == Some(file.file_name()) {
            return Err(UploadError::Rejected {
                status: 500,
                body: "stub failure".to_string(),
            });
        }

        Ok(UploadedMedia {
            url: format!("https://media.test/{}", file.file_name()),
        })
    }
}

/// Token settings with fixed secrets
pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_secret: "test-access-secret".to_string(),
        access_ttl: Duration::from_secs(60 * 60),
        refresh_secret: "test-refresh-secret".to_string(),
        refresh_ttl: Duration::from_secs(24 * 60 * 60),
    }
}

/// Application config for tests, staging uploads under `upload_dir`
pub fn test_config(upload_dir: &Path) -> AppConfig {
    AppConfig {
        port: 0,
        cors_origin: "*".to_string(),
        database_url: "postgres://localhost:5432".to_string(),
        database_name: "authdb_test".to_string(),
        tokens: test_token_config(),
        cloudinary: CloudinaryConfig::new("test", "key", "secret"),
        upload_temp_dir: upload_dir.to_path_buf(),
        upload_max_bytes: 1024 * 1024,
        bcrypt_cost: MIN_BCRYPT_COST,
        login_policy: LoginIdentifierPolicy::RequireBoth,
    }
}

/// Build `AppState` over in-memory collaborators
pub fn test_state(
    config: AppConfig,
    store: Arc<MemoryUserStore>,
    uploader: Arc<StubUploader>,
) -> AppState {
    let tokens = TokenService::new(config.tokens.clone(), store.clone());
    let auth = AuthService::new(store, uploader, tokens, config.login_policy, config.bcrypt_cost);
    AppState::new(config, auth)
}
