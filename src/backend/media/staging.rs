//! Staged upload files
//!
//! A `StagedFile` owns a temp file under the configured upload directory.
//! The file is removed when the value is dropped, so every exit path of a
//! request (validation failure, upload failure, success) cleans up after
//! itself.

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// An uploaded file written to local disk, pending transfer to the media host
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    file_name: String,
    content_type: Option<String>,
    size: usize,
}

impl StagedFile {
    /// Write `bytes` to a fresh file under `dir`
    ///
    /// The on-disk name is `<uuid>-<sanitized original name>`, so concurrent
    /// uploads of identically named files never collide.
    pub async fn stage(
        dir: &Path,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let file_name = sanitize_file_name(file_name.unwrap_or("upload"));
        let path = dir.join(format!("{}-{}", Uuid::new_v4(), file_name));
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Staged upload");

        Ok(Self {
            path,
            file_name,
            content_type: content_type.map(str::to_owned),
            size: bytes.len(),
        })
    }

    /// Location of the staged file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sanitized original file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type reported by the client
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to remove staged upload");
            }
        }
    }
}

fn sanitize_file_name(name: &str) -> String {
    // Drop any client-supplied directory components first
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_writes_and_drop_removes() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedFile::stage(dir.path(), Some("me.png"), Some("image/png"), b"png-bytes")
            .await
            .unwrap();

        let path = staged.path().to_path_buf();
        assert!(path.starts_with(dir.path()));
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
        assert_eq!(staged.file_name(), "me.png");
        assert_eq!(staged.content_type(), Some("image/png"));
        assert_eq!(staged.size(), 9);

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_stage_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("public").join("temp");
        let staged = StagedFile::stage(&nested, None, None, b"x").await.unwrap();
        assert!(staged.path().starts_with(&nested));
        assert_eq!(staged.file_name(), "upload");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\cat pic.jpg"), "cat_pic.jpg");
        assert_eq!(sanitize_file_name(".."), "upload");
    }
}
