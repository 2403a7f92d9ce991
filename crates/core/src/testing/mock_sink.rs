//! In-memory artifact sink for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::sink::{ArtifactSink, SinkError};

/// Mock implementation of the ArtifactSink trait.
///
/// Keeps written bytes in memory and reports paths under a fixed root.
/// Writes can be made to fail per name.
#[derive(Debug, Clone)]
pub struct MockSink {
    root: PathBuf,
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    writes: Arc<RwLock<Vec<String>>>,
    failing_names: Arc<RwLock<HashSet<String>>>,
    fail_prepare: Arc<RwLock<bool>>,
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("/mock/output"),
            files: Arc::new(RwLock::new(HashMap::new())),
            writes: Arc::new(RwLock::new(Vec::new())),
            failing_names: Arc::new(RwLock::new(HashSet::new())),
            fail_prepare: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every write of `name` fail.
    pub async fn fail_on(&self, name: impl Into<String>) {
        self.failing_names.write().await.insert(name.into());
    }

    /// Make `prepare` fail.
    pub async fn fail_prepare(&self) {
        *self.fail_prepare.write().await = true;
    }

    /// Names of successful writes, in call order.
    pub async fn written_names(&self) -> Vec<String> {
        self.writes.read().await.clone()
    }

    /// Number of stored files.
    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl ArtifactSink for MockSink {
    fn name(&self) -> &str {
        "mock-sink"
    }

    async fn prepare(&self) -> Result<(), SinkError> {
        if *self.fail_prepare.read().await {
            return Err(SinkError::CreateDir {
                path: self.root.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "permission denied",
                ),
            });
        }
        Ok(())
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        let path = self.root.join(name);
        if self.failing_names.read().await.contains(name) {
            return Err(SinkError::Write {
                path,
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }

        self.files
            .write()
            .await
            .insert(name.to_string(), bytes.to_vec());
        self.writes.write().await.push(name.to_string());
        Ok(path)
    }
}
