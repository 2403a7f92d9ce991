//! Local persistence of pipeline artifacts.
//!
//! An [`ArtifactSink`] receives the named byte payloads the pipeline
//! produces and returns where each one was written. [`FsSink`] writes them
//! into a single output directory, overwriting files from earlier runs.

mod fs_sink;

pub use fs_sink::FsSink;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from artifact persistence.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact name: {0}")]
    InvalidName(String),
}

/// Destination for finished artifacts.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Sink name for logging.
    fn name(&self) -> &str;

    /// Makes the destination ready to receive writes.
    async fn prepare(&self) -> Result<(), SinkError>;

    /// Writes `bytes` under `name`, replacing any previous content.
    async fn write(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError>;
}
