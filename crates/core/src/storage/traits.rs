//! Trait definitions for the storage module.

use async_trait::async_trait;
use std::path::Path;

use super::error::StorageError;

/// Stores local files in durable cloud storage.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Returns the name of this uploader implementation.
    fn name(&self) -> &str;

    /// Uploads `local_path` under its file name, replacing any existing
    /// object, and returns the object's addressable URL.
    async fn upload(&self, local_path: &Path) -> Result<String, StorageError>;
}
