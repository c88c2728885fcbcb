//! Sui RPC client module

use async_trait::async_trait;
use jsonrpsee::core::traits::ToRpcParams;
use serde::de::DeserializeOwned;

pub mod client;
pub mod connection;
pub mod error;
pub mod http_connection;
#[cfg(any(test, feature = "mocks"))]
pub mod mock_connection;

pub use client::SuiRpcClient;
pub use connection::{AnyRpcConnection, RpcConfig};
pub use error::{IntoRpcError, RpcConnectionError, RpcResult};
pub use http_connection::HttpConnection;
#[cfg(any(test, feature = "mocks"))]
pub use mock_connection::{ErrorMode, MockConnection};

/// JSON-RPC method names exposed by Sui fullnodes
pub mod methods {
    pub const VERIFY_SIGNATURE: &str = "sui_verifySignature";
    pub const GET_OBJECT: &str = "sui_getObject";
    pub const GET_OWNED_OBJECTS: &str = "sui_getOwnedObjects";
    pub const CHAIN_IDENTIFIER: &str = "sui_getChainIdentifier";
}

/// Trait for RPC connections
#[async_trait]
pub trait RpcConnection: Send + Sync {
    /// Execute a JSON-RPC method call
    async fn call<P, R>(&self, method: &str, params: P) -> RpcResult<R>
    where
        P: ToRpcParams + Send,
        R: DeserializeOwned;

    /// Execute a JSON-RPC method call without parameters
    async fn call_no_params<R>(&self, method: &str) -> RpcResult<R>
    where
        R: DeserializeOwned,
    {
        self.call(method, jsonrpsee::rpc_params![]).await
    }

    /// Check if the connection is currently usable
    async fn is_connected(&self) -> bool;
}
