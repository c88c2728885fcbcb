//! HTTP RPC connection implementation
//!
//! Sui fullnodes expose JSON-RPC over HTTP; this module wraps the
//! jsonrpsee HTTP client behind the [`RpcConnection`] trait.

use std::time::Duration;

use async_trait::async_trait;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde::de::DeserializeOwned;

use super::connection::RpcConfig;
use super::error::{IntoRpcError, RpcConnectionError, RpcResult};
use super::{methods, RpcConnection};

/// HTTP RPC connection to a Sui fullnode
pub struct HttpConnection {
    client: HttpClient,
}

impl HttpConnection {
    /// Create a new HTTP connection with the given configuration
    pub fn new(config: &RpcConfig) -> RpcResult<Self> {
        let mut builder = HttpClientBuilder::default();

        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(timeout_secs));
        }

        let client = builder.build(&config.url).map_err(|e| {
            RpcConnectionError::Transport(format!(
                "Failed to create HTTP client for {}: {}",
                config.url, e
            ))
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RpcConnection for HttpConnection {
    async fn call<P, R>(&self, method: &str, params: P) -> RpcResult<R>
    where
        P: ToRpcParams + Send,
        R: DeserializeOwned,
    {
        self.client
            .request(method, params)
            .await
            .map_err(|e| e.into_rpc_error())
    }

    async fn is_connected(&self) -> bool {
        self.client
            .request::<serde_json::Value, _>(methods::CHAIN_IDENTIFIER, jsonrpsee::rpc_params![])
            .await
            .is_ok()
    }
}
