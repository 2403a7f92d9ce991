//! File system sink implementation.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::{ArtifactSink, SinkError};

/// Writes artifacts as files inside one output directory.
pub struct FsSink {
    output_dir: PathBuf,
}

impl FsSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Resolves `name` inside the output directory. Names must be a single
    /// plain path component.
    fn target_path(&self, name: &str) -> Result<PathBuf, SinkError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.output_dir.join(name)),
            _ => Err(SinkError::InvalidName(name.to_string())),
        }
    }
}

#[async_trait]
impl ArtifactSink for FsSink {
    fn name(&self) -> &str {
        "fs"
    }

    async fn prepare(&self) -> Result<(), SinkError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| SinkError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
        let path = self.target_path(name)?;
        let write_err = |source| SinkError::Write {
            path: path.clone(),
            source,
        };

        let mut file = File::create(&path).await.map_err(write_err)?;
        file.write_all(bytes).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;

        debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(path)
    }
}
