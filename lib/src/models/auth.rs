use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: u64,
}

/// Sign-in submission: the signed message together with the claimed
/// address and the previously issued nonce.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub message: String,
    pub signature: String,
    pub address: String,
    pub nonce: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    /// Subject: the authenticated Sui address
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}
