/**
 * Cloudinary Upload Client
 *
 * Pushes staged files to Cloudinary's signed upload endpoint:
 *
 * ```text
 * POST {base_url}/v1_1/{cloud_name}/auto/upload
 *   file, api_key, timestamp, signature, signature_algorithm=sha256
 * ```
 *
 * The signature is `hex(sha256("timestamp=<ts>" + api_secret))`. The
 * returned `secure_url` is preferred; `url` is the fallback.
 */

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{MediaUploader, StagedFile, UploadError, UploadedMedia};

/// Default Cloudinary API origin
pub const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com";

/// Cloudinary credentials
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// API origin, overridable for tests
    pub base_url: String,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_CLOUDINARY_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

/// `MediaUploader` backed by Cloudinary
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn sign(params: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(params.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload_file(&self, file: &StagedFile) -> Result<UploadedMedia, UploadError> {
        let bytes = tokio::fs::read(file.path()).await?;
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign(&format!("timestamp={timestamp}"), &self.config.api_secret);

        let mut part = Part::bytes(bytes).file_name(file.file_name().to_string());
        if let Some(content_type) = file.content_type() {
            part = part.mime_str(content_type)?;
        }

        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
            .part("file", part);

        tracing::debug!(file = %file.file_name(), size = file.size(), "Uploading to Cloudinary");

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: CloudinaryUploadResponse = response.json().await?;
        let url = payload
            .secure_url
            .or(payload.url)
            .filter(|url| !url.is_empty())
            .ok_or(UploadError::MissingUrl)?;

        tracing::info!(url = %url, "Upload accepted");

        Ok(UploadedMedia { url })
    }
}
