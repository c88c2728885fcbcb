//! Sign-In-With-Sui authentication service
//!
//! Issues single-use sign-in nonces, verifies wallet signatures through
//! the Sui RPC, and mints/validates the bearer tokens protected
//! endpoints run on. Tokens are stateless: possession equals
//! authentication, validity is purely signature plus expiry.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, warn};

use crate::api::validation::validate_sui_address;
use crate::config::AuthConfig;
use crate::data::rpc::SuiRpcClient;
use crate::error::Error;
use crate::models::auth::{JwtClaims, TokenResponse, VerifyRequest};
use crate::repository::User;
use crate::services::users::UserService;

pub mod axum;

pub use self::axum::CurrentUser;

/// Compare a resource owner against the authenticated user.
///
/// Single authorization policy applied by every mutating operation on
/// owned resources.
pub fn authorize_owner(resource_owner_id: i64, user: &User) -> Result<(), Error> {
    if resource_owner_id == user.id {
        Ok(())
    } else {
        Err(Error::Forbidden("Not enough permissions".to_string()))
    }
}

/// In-process store of issued sign-in nonces.
///
/// A nonce is consumed exactly once and expires after a short TTL;
/// expired entries are pruned on issue so the map stays bounded.
struct NonceStore {
    ttl: Duration,
    issued: Mutex<HashMap<u64, DateTime<Utc>>>,
}

impl NonceStore {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: Mutex::new(HashMap::new()),
        }
    }

    fn issue(&self) -> u64 {
        let mut issued = self.issued.lock();
        let now = Utc::now();
        issued.retain(|_, expiry| *expiry > now);

        let mut rng = rand::thread_rng();
        loop {
            let nonce: u64 = rng.gen();
            if !issued.contains_key(&nonce) {
                issued.insert(nonce, now + self.ttl);
                return nonce;
            }
        }
    }

    fn consume(&self, nonce: u64) -> bool {
        match self.issued.lock().remove(&nonce) {
            Some(expiry) => expiry > Utc::now(),
            None => false,
        }
    }
}

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    token_ttl: Duration,
    nonces: NonceStore,
    rpc: Arc<SuiRpcClient>,
    users: Arc<UserService>,
}

impl AuthService {
    pub fn new(
        config: &AuthConfig,
        rpc: Arc<SuiRpcClient>,
        users: Arc<UserService>,
    ) -> Result<Self, Error> {
        if config.jwt_secret.is_empty() {
            return Err(Error::Config("auth.jwt_secret must be set".to_string()));
        }

        let algorithm: Algorithm = config.jwt_algorithm.parse().map_err(|_| {
            Error::Config(format!(
                "Unsupported JWT algorithm: {}",
                config.jwt_algorithm
            ))
        })?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
            token_ttl: Duration::seconds(config.token_ttl_secs as i64),
            nonces: NonceStore::new(Duration::seconds(config.nonce_ttl_secs as i64)),
            rpc,
            users,
        })
    }

    /// Issue a fresh sign-in nonce
    pub fn issue_nonce(&self) -> u64 {
        self.nonces.issue()
    }

    /// Complete a Sign-In-With-Sui attempt.
    ///
    /// Consumes the nonce, verifies the signature against the chain RPC,
    /// resolves (or lazily creates) the user record and issues a bearer
    /// token for the address.
    pub async fn login(&self, request: &VerifyRequest) -> Result<TokenResponse, Error> {
        validate_sui_address(&request.address)?;

        if !self.nonces.consume(request.nonce) {
            debug!(target: "auth_service::login", "unknown, reused or expired nonce");
            return Err(Error::Unauthorized("Invalid or expired nonce".to_string()));
        }

        if !self
            .rpc
            .verify_signature(&request.message, &request.signature)
            .await
        {
            debug!(target: "auth_service::login", address = %request.address, "signature rejected");
            return Err(Error::Unauthorized("Invalid signature".to_string()));
        }

        let user = self.users.get_or_create(&request.address).await?;
        self.users.touch_login(user.id).await;

        let access_token = self.issue_token(&user.sui_address)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Issue a signed token asserting `subject` until now + TTL
    pub fn issue_token(&self, subject: &str) -> Result<String, Error> {
        let now = Utc::now();
        self.encode_jwt(JwtClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_ttl).timestamp(),
        })
    }

    pub fn encode_jwt(&self, claims: JwtClaims) -> Result<String, Error> {
        encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            warn!(target: "auth_service::encode_jwt", error = %e, "failed to encode JWT");
            Error::Internal
        })
    }

    /// Validate a bearer token and return its subject address.
    ///
    /// Expired, malformed and wrongly-signed tokens are distinguished in
    /// the logs but collapse to a single Unauthorized for the client.
    pub fn decode_token(&self, token: &str) -> Result<String, Error> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        debug!(target: "auth_service::decode_token", "expired token")
                    }
                    ErrorKind::InvalidSignature => {
                        debug!(target: "auth_service::decode_token", "invalid token signature")
                    }
                    other => {
                        debug!(target: "auth_service::decode_token", error = ?other, "malformed token")
                    }
                }
                Error::Unauthorized("Could not validate credentials".to_string())
            },
        )?;

        if data.claims.sub.is_empty() {
            debug!(target: "auth_service::decode_token", "token without subject");
            return Err(Error::Unauthorized(
                "Could not validate credentials".to_string(),
            ));
        }

        Ok(data.claims.sub)
    }

    pub fn jwt_decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn jwt_validation(&self) -> &Validation {
        &self.validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::mocks::MOCK_ADDRESS;
    use crate::data::rpc::{AnyRpcConnection, MockConnection};
    use crate::repository::MockRepository;

    fn auth_service(config: AuthConfig) -> AuthService {
        let repository = Arc::new(MockRepository::new());
        let users = Arc::new(UserService::new(repository));
        let rpc = Arc::new(SuiRpcClient::new(Arc::new(AnyRpcConnection::Mock(
            MockConnection::new(),
        ))));

        AuthService::new(&config, rpc, users).expect("auth service should construct")
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            jwt_algorithm: "HS256".to_string(),
            token_ttl_secs: 3600,
            nonce_ttl_secs: 300,
        }
    }

    #[test]
    fn empty_secret_is_rejected() {
        let repository = Arc::new(MockRepository::new());
        let users = Arc::new(UserService::new(repository));
        let rpc = Arc::new(SuiRpcClient::new(Arc::new(AnyRpcConnection::Mock(
            MockConnection::new(),
        ))));

        let mut config = test_config();
        config.jwt_secret = String::new();

        assert!(matches!(
            AuthService::new(&config, rpc, users),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let mut config = test_config();
        config.jwt_algorithm = "ROT13".to_string();

        let repository = Arc::new(MockRepository::new());
        let users = Arc::new(UserService::new(repository));
        let rpc = Arc::new(SuiRpcClient::new(Arc::new(AnyRpcConnection::Mock(
            MockConnection::new(),
        ))));

        assert!(matches!(
            AuthService::new(&config, rpc, users),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn token_round_trip() {
        let service = auth_service(test_config());

        let token = service.issue_token(MOCK_ADDRESS).unwrap();
        let subject = service.decode_token(&token).unwrap();

        assert_eq!(subject, MOCK_ADDRESS);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = auth_service(test_config());

        let token = service
            .encode_jwt(JwtClaims {
                sub: MOCK_ADDRESS.to_string(),
                iat: Utc::now().timestamp() - 7200,
                exp: Utc::now().timestamp() - 3600,
            })
            .unwrap();

        assert!(matches!(
            service.decode_token(&token),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn token_signed_with_different_secret_is_rejected() {
        let issuer = auth_service(AuthConfig {
            jwt_secret: "another-secret".to_string(),
            ..test_config()
        });
        let validator = auth_service(test_config());

        let token = issuer.issue_token(MOCK_ADDRESS).unwrap();

        assert!(matches!(
            validator.decode_token(&token),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn token_without_subject_is_rejected() {
        let service = auth_service(test_config());

        let token = service
            .encode_jwt(JwtClaims {
                sub: String::new(),
                iat: Utc::now().timestamp(),
                exp: Utc::now().timestamp() + 3600,
            })
            .unwrap();

        assert!(matches!(
            service.decode_token(&token),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn nonce_is_single_use() {
        let service = auth_service(test_config());

        let nonce = service.issue_nonce();
        assert!(service.nonces.consume(nonce));
        assert!(!service.nonces.consume(nonce));
    }

    #[test]
    fn unissued_nonce_is_rejected() {
        let service = auth_service(test_config());

        assert!(!service.nonces.consume(42));
    }

    #[test]
    fn expired_nonce_is_rejected() {
        let mut config = test_config();
        config.nonce_ttl_secs = 0;
        let service = auth_service(config);

        let nonce = service.issue_nonce();
        assert!(!service.nonces.consume(nonce));
    }

    #[test]
    fn owner_policy() {
        let user = User {
            id: 7,
            sui_address: MOCK_ADDRESS.to_string(),
            username: None,
            email: None,
            avatar_url: None,
            bio: None,
            is_verified: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
            last_login: None,
        };

        assert!(authorize_owner(7, &user).is_ok());
        assert!(matches!(
            authorize_owner(8, &user),
            Err(Error::Forbidden(_))
        ));
    }
}
