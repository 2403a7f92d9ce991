//! Durable cloud storage for source media and published artifacts.
//!
//! The `Uploader` trait is the only surface the pipeline uses. The Azure
//! implementation issues `Put Blob` requests against the Blob service REST API
//! and authenticates with either the account key (Shared Key) or a shared
//! access signature taken from a standard connection string.

mod azure;
mod connection_string;
mod error;
mod traits;

pub use azure::AzureBlobUploader;
pub use connection_string::{ConnectionString, StorageCredential};
pub use error::StorageError;
pub use traits::Uploader;
