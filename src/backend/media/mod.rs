//! Media Upload Module
//!
//! Uploaded profile images take two hops: the multipart part is first
//! staged to a local temp file, then the staged file is pushed to the
//! media host and replaced by its hosted URL.
//!
//! # Module Structure
//!
//! ```text
//! media/
//! ├── mod.rs        - MediaUploader port, UploadedMedia, UploadError
//! ├── staging.rs    - StagedFile (temp file removed on drop)
//! └── cloudinary.rs - Cloudinary upload API client
//! ```
//!
//! Presence is explicit: `MediaUploader::upload` takes an
//! `Option<&StagedFile>` and answers `Ok(None)` for an absent file, so
//! callers never inspect a form for "does this field exist".

use async_trait::async_trait;
use thiserror::Error;

/// Staged upload files
pub mod staging;

/// Cloudinary client
pub mod cloudinary;

pub use cloudinary::{CloudinaryConfig, CloudinaryUploader};
pub use staging::StagedFile;

/// A file accepted by the media host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Hosted URL of the file
    pub url: String,
}

/// Upload failures
#[derive(Debug, Error)]
pub enum UploadError {
    /// Reading or writing the staged file failed
    #[error("staging I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The request to the media host failed
    #[error("media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The media host answered with a non-success status
    #[error("media host rejected upload with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the host
        status: u16,
        /// Response body, for logs
        body: String,
    },

    /// The media host accepted the file but returned no URL
    #[error("media host response carried no URL")]
    MissingUrl,
}

/// Media host port
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload a staged file and return its hosted location
    async fn upload_file(&self, file: &StagedFile) -> Result<UploadedMedia, UploadError>;

    /// Upload an optional file; an absent file is `Ok(None)`
    async fn upload(&self, file: Option<&StagedFile>) -> Result<Option<UploadedMedia>, UploadError> {
        match file {
            Some(file) => self.upload_file(file).await.map(Some),
            None => Ok(None),
        }
    }
}
