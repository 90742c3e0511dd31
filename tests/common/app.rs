//! Router-level test harness
//!
//! Builds the production router over `MemoryUserStore` and `StubUploader`
//! and drives it with `tower::ServiceExt::oneshot`; no socket, database or
//! media host is involved.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::SET_COOKIE, HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use userauth::backend::routes::create_router;
use userauth::backend::server::AppConfig;
use userauth::backend::test_support::{test_config, test_state, MemoryUserStore, StubUploader};

/// Application under test plus handles on its collaborators
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub uploader: Arc<StubUploader>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(StubUploader::new(), |_| {})
    }

    /// Build an app with a custom uploader and config tweaks
    pub fn with(uploader: StubUploader, configure: impl FnOnce(&mut AppConfig)) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        let mut config = test_config(upload_dir.path());
        configure(&mut config);

        let store = Arc::new(MemoryUserStore::default());
        let uploader = Arc::new(uploader);
        let state = test_state(config, store.clone(), uploader.clone());

        Self {
            router: create_router(state),
            store,
            uploader,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router returned an error");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Number of files left in the staging directory
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// A fully buffered response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// All `Set-Cookie` header values
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect()
    }

    /// The `Set-Cookie` header for one cookie name
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies()
            .into_iter()
            .find(|cookie| cookie.starts_with(&prefix))
    }

    /// Value of a cookie set by this response
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        let header = self.set_cookie(name)?;
        let pair = header.split(';').next()?;
        pair.split_once('=').map(|(_, value)| value.to_string())
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
