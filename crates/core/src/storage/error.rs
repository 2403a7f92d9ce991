//! Error types for the storage module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while uploading to cloud storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection string could not be parsed.
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// The local path has no usable file name for the blob.
    #[error("Cannot derive a blob name from {path}")]
    InvalidPath { path: PathBuf },

    /// Failed to read the local file.
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not reach the storage endpoint.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Storage service rejected the request.
    #[error("Storage API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Request signing failed.
    #[error("Failed to sign request: {0}")]
    Signing(String),
}
