//! Mock uploader for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{StorageError, Uploader};

/// Mock implementation of the Uploader trait.
///
/// Returns `{base_url}/{file name}` for every upload and records the
/// uploaded paths in call order.
///
/// # Example
///
/// ```rust,ignore
/// use vidpipe_core::testing::MockUploader;
///
/// let uploader = MockUploader::new();
/// uploader.set_next_error(StorageError::Timeout).await;
///
/// assert!(uploader.upload(Path::new("talk.mp4")).await.is_err());
/// assert!(uploader.upload(Path::new("talk.mp4")).await.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MockUploader {
    base_url: Arc<RwLock<String>>,
    uploads: Arc<RwLock<Vec<PathBuf>>>,
    next_error: Arc<RwLock<Option<StorageError>>>,
}

impl Default for MockUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUploader {
    pub fn new() -> Self {
        Self {
            base_url: Arc::new(RwLock::new(
                "https://mock.blob.core.windows.net/videos".to_string(),
            )),
            uploads: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the URL prefix returned for uploads.
    pub async fn set_base_url(&self, base_url: impl Into<String>) {
        *self.base_url.write().await = base_url.into();
    }

    /// Configure the next upload to fail with the given error.
    pub async fn set_next_error(&self, error: StorageError) {
        *self.next_error.write().await = Some(error);
    }

    /// Paths of every attempted upload, including failed ones.
    pub async fn recorded_uploads(&self) -> Vec<PathBuf> {
        self.uploads.read().await.clone()
    }

    /// URL an upload of `path` would return.
    pub async fn url_for(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}/{}", self.base_url.read().await, name)
    }
}

#[async_trait]
impl Uploader for MockUploader {
    fn name(&self) -> &str {
        "mock-uploader"
    }

    async fn upload(&self, local_path: &Path) -> Result<String, StorageError> {
        self.uploads.write().await.push(local_path.to_path_buf());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        Ok(self.url_for(local_path).await)
    }
}
