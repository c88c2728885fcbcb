//! RPC connection abstraction for the Sui fullnode

use std::fmt::Debug;

use async_trait::async_trait;
use jsonrpsee::core::traits::ToRpcParams;
use serde::de::DeserializeOwned;

use super::error::RpcResult;
use super::http_connection::HttpConnection;
#[cfg(any(test, feature = "mocks"))]
use super::mock_connection::MockConnection;
use super::RpcConnection;

/// Configuration for an RPC connection
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub url: String,
    pub timeout_secs: Option<u64>,
}

/// Enum wrapper for different RPC connection implementations
///
/// This enum allows using concrete types instead of trait objects,
/// solving trait object safety issues while maintaining flexibility
/// between real and mock connections.
pub enum AnyRpcConnection {
    /// Real HTTP connection to a Sui fullnode
    Http(HttpConnection),

    /// Mock connection for testing
    #[cfg(any(test, feature = "mocks"))]
    Mock(MockConnection),
}

impl Debug for AnyRpcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyRpcConnection::Http(_) => write!(f, "AnyRpcConnection::Http(HttpConnection)"),
            #[cfg(any(test, feature = "mocks"))]
            AnyRpcConnection::Mock(_) => write!(f, "AnyRpcConnection::Mock(MockConnection)"),
        }
    }
}

#[async_trait]
impl RpcConnection for AnyRpcConnection {
    async fn call<P, R>(&self, method: &str, params: P) -> RpcResult<R>
    where
        P: ToRpcParams + Send,
        R: DeserializeOwned,
    {
        match self {
            AnyRpcConnection::Http(conn) => conn.call(method, params).await,
            #[cfg(any(test, feature = "mocks"))]
            AnyRpcConnection::Mock(conn) => conn.call(method, params).await,
        }
    }

    async fn is_connected(&self) -> bool {
        match self {
            AnyRpcConnection::Http(conn) => conn.is_connected().await,
            #[cfg(any(test, feature = "mocks"))]
            AnyRpcConnection::Mock(conn) => conn.is_connected().await,
        }
    }
}
