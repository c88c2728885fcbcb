//! Configuration constants for the Property Finder backend

/// Default server configuration
pub mod server {
    /// Default HTTP listening host
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP server port
    pub const DEFAULT_PORT: u16 = 8000;
}

/// Authentication configuration
pub mod auth {
    /// Default JWT signing algorithm
    pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";

    /// Default access token lifetime (7 days)
    pub const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60 * 24 * 7;

    /// Default sign-in nonce lifetime
    pub const DEFAULT_NONCE_TTL_SECS: u64 = 300;
}

/// Database configuration
pub mod database {
    /// Default maximum database connections
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Default PostgreSQL database URL
    pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/property_finder";
}

/// Sui RPC client configuration
pub mod rpc {
    /// Default RPC request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default Sui fullnode RPC URL
    pub const DEFAULT_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";
}

/// IPFS configuration
pub mod ipfs {
    /// Default IPFS HTTP API URL
    pub const DEFAULT_API_URL: &str = "http://localhost:5001";

    /// Default IPFS gateway URL
    pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080";
}

/// Property search configuration
pub mod search {
    /// Default page size for search results
    pub const DEFAULT_PAGE_LIMIT: i64 = 10;

    /// Maximum page size for search results
    pub const MAX_PAGE_LIMIT: i64 = 100;
}

#[cfg(any(test, feature = "mocks"))]
pub mod mocks {
    /// The user address to mock (a 32-byte Sui address)
    pub const MOCK_ADDRESS: &str =
        "0x0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc0abc";

    /// A second address for multi-user scenarios
    pub const MOCK_ADDRESS_2: &str =
        "0x1def1def1def1def1def1def1def1def1def1def1def1def1def1def1def1def";

    /// JWT secret used by mock services
    pub const MOCK_JWT_SECRET: &str = "test-secret-do-not-use";
}
