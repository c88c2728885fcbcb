//! Shared utilities for HTTP-level tests

use axum::http::StatusCode;
use axum_test::TestServer;

use crate::models::auth::{NonceResponse, TokenResponse, VerifyRequest};

/// Request a sign-in nonce from the server
pub async fn request_nonce(server: &TestServer) -> u64 {
    let response = server.post("/auth/nonce").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let nonce_response: NonceResponse = response.json();
    nonce_response.nonce
}

/// Build a sign-in submission for the given address and nonce
pub fn verify_request(address: &str, nonce: u64) -> VerifyRequest {
    VerifyRequest {
        message: format!("Sign in to Property Finder\nAddress: {address}\nNonce: {nonce}"),
        signature: "0xmocksignature".to_string(),
        address: address.to_string(),
        nonce,
    }
}

/// Run the whole sign-in flow and return the bearer token
pub async fn login(server: &TestServer, address: &str) -> String {
    let nonce = request_nonce(server).await;

    let response = server
        .post("/auth/verify")
        .json(&verify_request(address, nonce))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let token_response: TokenResponse = response.json();
    assert_eq!(token_response.token_type, "bearer");
    token_response.access_token
}
