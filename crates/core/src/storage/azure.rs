//! Azure Blob Storage uploader.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use sha2::Sha256;
use tracing::debug;

use crate::config::StorageConfig;
use crate::metrics;

use super::connection_string::{ConnectionString, StorageCredential};
use super::error::StorageError;
use super::traits::Uploader;

/// Blob service REST API version sent with every request.
const API_VERSION: &str = "2021-08-06";

type HmacSha256 = Hmac<Sha256>;

/// Uploads files as block blobs into a single container.
pub struct AzureBlobUploader {
    client: Client,
    connection: ConnectionString,
    container: String,
    timeout: Duration,
}

impl AzureBlobUploader {
    /// Create an uploader from storage configuration.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let connection = ConnectionString::parse(&config.connection_string)?;
        Ok(Self {
            client: Client::new(),
            connection,
            container: config.container.clone(),
            timeout: Duration::from_secs(config.timeout_secs as u64),
        })
    }

    /// Public URL of a blob in the configured container.
    pub fn blob_url(&self, blob_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.connection.blob_endpoint,
            self.container,
            urlencoding::encode(blob_name)
        )
    }

    /// Canonicalized resource for Shared Key signing: the account name
    /// followed by the encoded URI path.
    fn canonical_resource(account_name: &str, url: &str) -> Result<String, StorageError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| StorageError::Signing(e.to_string()))?;
        Ok(format!("/{}{}", account_name, parsed.path()))
    }

    async fn put_blob(&self, blob_name: &str, data: Vec<u8>) -> Result<String, StorageError> {
        let url = self.blob_url(blob_name);
        let content_type = content_type_for(blob_name);
        let date = rfc1123(Utc::now());

        let request_url = match &self.connection.credential {
            StorageCredential::Sas(token) => format!("{}?{}", url, token),
            StorageCredential::SharedKey { .. } => url.clone(),
        };

        let mut request = self
            .client
            .put(&request_url)
            .timeout(self.timeout)
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-blob-type", "BlockBlob")
            .header("content-type", content_type);

        if let StorageCredential::SharedKey {
            account_name,
            account_key,
        } = &self.connection.credential
        {
            let string_to_sign = put_blob_string_to_sign(
                data.len(),
                content_type,
                &date,
                &Self::canonical_resource(account_name, &url)?,
            );
            let signature = sign(account_key, &string_to_sign)?;
            request = request.header(
                "authorization",
                format!("SharedKey {}:{}", account_name, signature),
            );
        }

        debug!(blob = blob_name, bytes = data.len(), "Uploading blob");

        let response = request.body(data).send().await.map_err(|e| {
            if e.is_timeout() {
                StorageError::Timeout
            } else {
                StorageError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| status.to_string()),
            });
        }

        Ok(url)
    }
}

#[async_trait]
impl Uploader for AzureBlobUploader {
    fn name(&self) -> &str {
        "azure_blob"
    }

    async fn upload(&self, local_path: &Path) -> Result<String, StorageError> {
        let blob_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| StorageError::InvalidPath {
                path: local_path.to_path_buf(),
            })?;

        let data = tokio::fs::read(local_path)
            .await
            .map_err(|source| StorageError::Io {
                path: local_path.to_path_buf(),
                source,
            })?;

        let result = self.put_blob(blob_name, data).await;
        metrics::record_service_call("azure_blob", "put_blob", result.is_ok());
        result
    }
}

/// Date in the format required by `x-ms-date`.
fn rfc1123(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// String-to-sign for a `Put Blob` request with no optional standard headers.
fn put_blob_string_to_sign(
    content_length: usize,
    content_type: &str,
    date: &str,
    canonical_resource: &str,
) -> String {
    // Content-Length must be empty when zero.
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };

    format!(
        "PUT\n\n\n{}\n\n{}\n\n\n\n\n\n\nx-ms-blob-type:BlockBlob\nx-ms-date:{}\nx-ms-version:{}\n{}",
        length, content_type, date, API_VERSION, canonical_resource
    )
}

fn sign(account_key: &[u8], string_to_sign: &str) -> Result<String, StorageError> {
    let mut mac = HmacSha256::new_from_slice(account_key)
        .map_err(|e| StorageError::Signing(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

fn content_type_for(blob_name: &str) -> &'static str {
    let extension = Path::new(blob_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => "text/plain; charset=utf-8",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Extracts `<Message>` from a Blob service XML error body.
fn error_message(body: &str) -> Option<String> {
    let start = body.find("<Message>")? + "<Message>".len();
    let end = body[start..].find("</Message>")? + start;
    let message = body[start..end].lines().next().unwrap_or_default().trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
