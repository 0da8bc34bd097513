//! Upload Storage: writes uploaded images to a local directory that is
//! served back under `/uploads`.

use std::path::PathBuf;

use letterpress_core::uploads::{image_extension, stored_filename};

use crate::error::{AppError, AppResult};

/// URL path prefix the upload directory is mounted at.
pub const UPLOADS_MOUNT: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct UploadStorage {
    dir: PathBuf,
    public_base_url: Option<String>,
}

impl UploadStorage {
    /// `public_base_url` must already be normalized (no trailing slash).
    pub fn new(dir: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url,
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Validate the original filename, write `data` under a timestamp-derived
    /// name and return the stored name. The directory is created on demand.
    pub async fn store_image(&self, original_name: &str, data: &[u8]) -> AppResult<String> {
        let ext = image_extension(original_name)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        let filename = stored_filename(&ext, chrono::Utc::now());
        tokio::fs::write(self.dir.join(&filename), data)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        tracing::info!(filename = %filename, bytes = data.len(), "Image stored");
        Ok(filename)
    }

    /// Public URL for a stored file. Falls back to `http://<host>` when no
    /// public base URL is configured.
    pub fn public_url(&self, filename: &str, host: Option<&str>) -> String {
        let base = match (&self.public_base_url, host) {
            (Some(base), _) => base.clone(),
            (None, Some(host)) => format!("http://{host}"),
            (None, None) => String::new(),
        };
        format!("{base}{UPLOADS_MOUNT}/{filename}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use letterpress_core::error::CoreError;

    #[tokio::test]
    async fn stores_image_under_timestamp_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path().join("nested"), None);

        let name = storage.store_image("Logo.PNG", b"\x89PNG").await.unwrap();
        assert!(name.ends_with(".png"), "got {name}");
        assert!(name.trim_end_matches(".png").parse::<i64>().is_ok());

        let written = std::fs::read(dir.path().join("nested").join(&name)).unwrap();
        assert_eq!(written, b"\x89PNG");
    }

    #[tokio::test]
    async fn rejects_non_image_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::new(dir.path(), None);

        assert_matches!(
            storage.store_image("script.js", b"alert(1)").await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn public_url_prefers_configured_base() {
        let storage = UploadStorage::new("uploads", Some("https://cdn.example.com".into()));
        assert_eq!(
            storage.public_url("1.png", Some("localhost:5000")),
            "https://cdn.example.com/uploads/1.png"
        );
    }

    #[test]
    fn public_url_falls_back_to_host() {
        let storage = UploadStorage::new("uploads", None);
        assert_eq!(
            storage.public_url("1.png", Some("localhost:5000")),
            "http://localhost:5000/uploads/1.png"
        );
        assert_eq!(storage.public_url("1.png", None), "/uploads/1.png");
    }
}
