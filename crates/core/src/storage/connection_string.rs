//! Azure storage connection string parsing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::HashMap;

use super::error::StorageError;

const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// How requests to the Blob service are authorized.
#[derive(Clone)]
pub enum StorageCredential {
    /// Account name and decoded account key, used for Shared Key signing.
    SharedKey {
        account_name: String,
        account_key: Vec<u8>,
    },
    /// Shared access signature query string (without the leading `?`).
    Sas(String),
}

impl std::fmt::Debug for StorageCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SharedKey { account_name, .. } => f
                .debug_struct("SharedKey")
                .field("account_name", account_name)
                .field("account_key", &"<redacted>")
                .finish(),
            Self::Sas(_) => f.write_str("Sas(<redacted>)"),
        }
    }
}

/// A parsed storage connection string.
#[derive(Debug, Clone)]
pub struct ConnectionString {
    /// Blob service endpoint without trailing slash.
    pub blob_endpoint: String,
    pub credential: StorageCredential,
}

impl ConnectionString {
    /// Parses `Key=Value;Key=Value` connection strings as issued by the
    /// Azure portal, including `UseDevelopmentStorage=true`.
    pub fn parse(input: &str) -> Result<Self, StorageError> {
        let mut pairs: HashMap<&str, &str> = HashMap::new();
        for segment in input.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                StorageError::InvalidConnectionString(format!(
                    "segment '{}' is not of the form Key=Value",
                    key_only(segment)
                ))
            })?;
            pairs.insert(key.trim(), value.trim());
        }

        if pairs
            .get("UseDevelopmentStorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(Self::development());
        }

        let account_name = pairs.get("AccountName").map(|s| s.to_string());

        let blob_endpoint = match pairs.get("BlobEndpoint") {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let account = account_name.as_deref().ok_or_else(|| {
                    StorageError::InvalidConnectionString(
                        "AccountName or BlobEndpoint is required".to_string(),
                    )
                })?;
                let protocol = pairs.get("DefaultEndpointsProtocol").unwrap_or(&"https");
                let suffix = pairs.get("EndpointSuffix").unwrap_or(&"core.windows.net");
                format!("{}://{}.blob.{}", protocol, account, suffix)
            }
        };

        let credential = if let Some(sas) = pairs.get("SharedAccessSignature") {
            StorageCredential::Sas(sas.trim_start_matches('?').to_string())
        } else if let Some(key) = pairs.get("AccountKey") {
            let account_name = account_name.ok_or_else(|| {
                StorageError::InvalidConnectionString(
                    "AccountName is required with AccountKey".to_string(),
                )
            })?;
            let account_key = STANDARD.decode(key).map_err(|e| {
                StorageError::InvalidConnectionString(format!("AccountKey is not base64: {}", e))
            })?;
            StorageCredential::SharedKey {
                account_name,
                account_key,
            }
        } else {
            return Err(StorageError::InvalidConnectionString(
                "AccountKey or SharedAccessSignature is required".to_string(),
            ));
        };

        Ok(Self {
            blob_endpoint,
            credential,
        })
    }

    /// Connection to the local storage emulator.
    fn development() -> Self {
        Self {
            blob_endpoint: DEV_BLOB_ENDPOINT.to_string(),
            credential: StorageCredential::SharedKey {
                account_name: DEV_ACCOUNT_NAME.to_string(),
                // Constant is valid base64.
                account_key: STANDARD.decode(DEV_ACCOUNT_KEY).unwrap_or_default(),
            },
        }
    }
}

/// Avoids echoing secret values in parse errors.
fn key_only(segment: &str) -> String {
    segment.chars().take(24).collect()
}
