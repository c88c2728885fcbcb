//! Mock RPC connection implementation for testing
//!
//! Provides a mock connection that can be configured with predefined
//! responses and error scenarios.

use std::collections::HashMap;

use async_trait::async_trait;
use jsonrpsee::core::traits::ToRpcParams;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{RpcConnectionError, RpcResult};
use super::RpcConnection;

/// Error simulation modes for testing
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorMode {
    /// No errors, calls answer from the configured responses
    None,
    /// Simulate a request timeout
    Timeout,
    /// Simulate a transport error
    Transport(String),
    /// Simulate a JSON-RPC error
    Rpc(String),
}

/// Mock RPC connection for testing
pub struct MockConnection {
    /// Predefined responses for specific methods
    responses: RwLock<HashMap<String, Value>>,
    /// Error simulation mode
    error_mode: RwLock<ErrorMode>,
    /// Whether the connection reports as connected
    connected: RwLock<bool>,
}

impl Default for MockConnection {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            error_mode: RwLock::new(ErrorMode::None),
            connected: RwLock::new(true),
        }
    }
}

impl MockConnection {
    /// Create a new mock connection with no responses configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom response for a specific method
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses.write().insert(method.to_string(), response);
    }

    /// Set the error simulation mode
    pub fn set_error_mode(&self, mode: ErrorMode) {
        *self.error_mode.write() = mode;
    }

    /// Set whether the connection reports as connected
    pub fn set_connected(&self, connected: bool) {
        *self.connected.write() = connected;
    }
}

#[async_trait]
impl RpcConnection for MockConnection {
    async fn call<P, R>(&self, method: &str, _params: P) -> RpcResult<R>
    where
        P: ToRpcParams + Send,
        R: DeserializeOwned,
    {
        match self.error_mode.read().clone() {
            ErrorMode::None => {}
            ErrorMode::Timeout => return Err(RpcConnectionError::Timeout),
            ErrorMode::Transport(msg) => return Err(RpcConnectionError::Transport(msg)),
            ErrorMode::Rpc(msg) => return Err(RpcConnectionError::Rpc(msg)),
        }

        let response = self
            .responses
            .read()
            .get(method)
            .cloned()
            .ok_or_else(|| RpcConnectionError::Rpc(format!("Method not mocked: {}", method)))?;

        serde_json::from_value(response)
            .map_err(|e| RpcConnectionError::Serialization(e.to_string()))
    }

    async fn is_connected(&self) -> bool {
        *self.connected.read()
    }
}
