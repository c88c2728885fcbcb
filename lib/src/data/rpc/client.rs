//! Sui RPC client implementation

use std::sync::Arc;

use jsonrpsee::core::params::ArrayParams;
use serde::Deserialize;
use tracing::debug;

use super::error::{RpcConnectionError, RpcResult};
use super::{methods, AnyRpcConnection, RpcConnection};

/// Response shape of `sui_verifySignature`
#[derive(Debug, Deserialize)]
pub struct VerifySignatureResult {
    #[serde(default)]
    pub is_valid: bool,
}

/// Sui RPC client that uses an RpcConnection
pub struct SuiRpcClient {
    connection: Arc<AnyRpcConnection>,
}

impl SuiRpcClient {
    /// Create a new SuiRpcClient with the given connection
    pub fn new(connection: Arc<AnyRpcConnection>) -> Self {
        Self { connection }
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.is_connected().await
    }

    /// Check whether `signature` was produced over exactly `message` by
    /// the key controlling the signing address.
    ///
    /// This is a boolean decision, not an exceptional one: transport
    /// failures, timeouts and malformed responses all count as `false`.
    /// Every call re-verifies against the fullnode; verdicts are never
    /// cached.
    pub async fn verify_signature(&self, message: &str, signature: &str) -> bool {
        let result: RpcResult<VerifySignatureResult> = self
            .connection
            .call(
                methods::VERIFY_SIGNATURE,
                jsonrpsee::rpc_params![message, signature],
            )
            .await;

        match result {
            Ok(verdict) => verdict.is_valid,
            Err(e) => {
                debug!(target: "rpc::client::verify_signature", error = %e, "signature verification call failed");
                false
            }
        }
    }

    /// Fetch a Sui object by its ID
    pub async fn get_object(&self, object_id: &str) -> RpcResult<serde_json::Value> {
        debug!(target: "rpc::client::get_object", object_id = %object_id, "RPC call: get_object");

        self.connection
            .call(methods::GET_OBJECT, jsonrpsee::rpc_params![object_id])
            .await
    }

    /// List objects owned by an address, optionally filtered by type
    pub async fn get_owned_objects(
        &self,
        address: &str,
        object_type: Option<&str>,
    ) -> RpcResult<serde_json::Value> {
        debug!(target: "rpc::client::get_owned_objects", address = %address, "RPC call: get_owned_objects");

        let mut params = ArrayParams::new();
        params
            .insert(address)
            .map_err(|e| RpcConnectionError::Serialization(e.to_string()))?;
        if let Some(object_type) = object_type {
            params
                .insert(serde_json::json!({ "StructType": object_type }))
                .map_err(|e| RpcConnectionError::Serialization(e.to_string()))?;
        }

        self.connection
            .call(methods::GET_OWNED_OBJECTS, params)
            .await
    }
}
