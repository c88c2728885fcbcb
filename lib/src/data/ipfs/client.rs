//! IPFS HTTP API client

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::IpfsConfig;

use super::{MediaResult, MediaStorage, MediaStorageError};

/// Response shape of the IPFS `add` endpoint
#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// Client for the IPFS HTTP API
pub struct IpfsClient {
    http: reqwest::Client,
    api_url: String,
}

impl IpfsClient {
    pub fn new(config: &IpfsConfig) -> MediaResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| MediaStorageError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaStorage for IpfsClient {
    async fn store(&self, filename: &str, bytes: Vec<u8>) -> MediaResult<String> {
        debug!(target: "ipfs::client", filename = %filename, size = bytes.len(), "uploading file");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/api/v0/add", self.api_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaStorageError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| MediaStorageError::UnexpectedResponse(e.to_string()))?;

        let added: AddResponse = response
            .json()
            .await
            .map_err(|e| MediaStorageError::UnexpectedResponse(e.to_string()))?;

        Ok(added.hash)
    }
}
