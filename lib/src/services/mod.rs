//! Services module for the Property Finder backend

pub mod auth;
pub mod health;
pub mod properties;
pub mod users;

use std::sync::Arc;

use crate::config::Config;
use crate::data::ipfs::MediaStorage;
use crate::data::rpc::SuiRpcClient;
use crate::error::Error;
use crate::repository::ListingsOps;

#[derive(Clone)]
pub struct Services {
    pub auth: Arc<auth::AuthService>,
    pub users: Arc<users::UserService>,
    pub properties: Arc<properties::PropertyService>,
    pub health: Arc<health::HealthService>,
}

impl Services {
    pub fn new(
        config: &Config,
        repository: Arc<dyn ListingsOps>,
        rpc: Arc<SuiRpcClient>,
        media: Arc<dyn MediaStorage>,
    ) -> Result<Self, Error> {
        let users = Arc::new(users::UserService::new(repository.clone()));
        let auth = Arc::new(auth::AuthService::new(
            &config.auth,
            rpc.clone(),
            users.clone(),
        )?);
        let properties = Arc::new(properties::PropertyService::new(repository.clone(), media));
        let health = Arc::new(health::HealthService::new(repository, rpc));

        Ok(Self {
            auth,
            users,
            properties,
            health,
        })
    }

    /// Config used by mock services: defaults plus a test signing secret
    #[cfg(any(test, feature = "mocks"))]
    pub fn mock_config() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = crate::constants::mocks::MOCK_JWT_SECRET.to_string();
        config
    }

    /// Create services with everything mocked
    #[cfg(any(test, feature = "mocks"))]
    pub fn mocks() -> Self {
        Self::mocks_with_config(Self::mock_config())
    }

    /// Create mocked services with the given configuration. The mock RPC
    /// connection validates every signature.
    #[cfg(any(test, feature = "mocks"))]
    pub fn mocks_with_config(config: Config) -> Self {
        use crate::data::rpc::{methods, AnyRpcConnection, MockConnection};

        let connection = MockConnection::new();
        connection.set_response(
            methods::VERIFY_SIGNATURE,
            serde_json::json!({ "is_valid": true }),
        );

        let repository = Arc::new(crate::repository::MockRepository::new());
        let rpc = Arc::new(SuiRpcClient::new(Arc::new(AnyRpcConnection::Mock(
            connection,
        ))));
        let media = Arc::new(crate::data::ipfs::InMemoryMediaStore::new());

        Self::new(&config, repository, rpc, media).expect("mock services should construct")
    }
}
