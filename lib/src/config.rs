use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::constants::auth::{
    DEFAULT_JWT_ALGORITHM, DEFAULT_NONCE_TTL_SECS, DEFAULT_TOKEN_TTL_SECS,
};
use crate::constants::database::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};
use crate::constants::ipfs::{DEFAULT_API_URL, DEFAULT_GATEWAY_URL};
use crate::constants::rpc::{DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS};
use crate::constants::server::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub log_format: LogFormat,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
    pub sui: SuiConfig,
    pub ipfs: IpfsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Symmetric JWT signing secret. Must be set; an empty secret is
    /// rejected at service construction.
    pub jwt_secret: String,
    pub jwt_algorithm: String,
    pub token_ttl_secs: u64,
    pub nonce_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[cfg(feature = "mocks")]
    #[serde(default)]
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiConfig {
    pub rpc_url: String,
    pub timeout_secs: Option<u64>,
    #[cfg(feature = "mocks")]
    #[serde(default)]
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpfsConfig {
    pub api_url: String,
    pub gateway_url: String,
}

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Pick Json when stdout is not a terminal, Text otherwise
    #[default]
    Auto,
    Json,
    Text,
}

impl LogFormat {
    /// Resolve Auto into a concrete format based on the TTY status of stdout
    pub fn resolve(self) -> Self {
        match self {
            LogFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    LogFormat::Text
                } else {
                    LogFormat::Json
                }
            }
            other => other,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // these are just some sane defaults, most likely we will
        // have them overridden
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::Auto,
            auth: AuthConfig {
                jwt_secret: String::new(),
                jwt_algorithm: DEFAULT_JWT_ALGORITHM.to_string(),
                token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
                nonce_ttl_secs: DEFAULT_NONCE_TTL_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
                #[cfg(feature = "mocks")]
                mock_mode: true,
            },
            sui: SuiConfig {
                rpc_url: DEFAULT_RPC_URL.to_string(),
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
                #[cfg(feature = "mocks")]
                mock_mode: true,
            },
            ipfs: IpfsConfig {
                api_url: DEFAULT_API_URL.to_string(),
                gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml() {
        let toml = r#"
            host = "0.0.0.0"
            port = 9000

            [auth]
            jwt_secret = "s3cret"
            jwt_algorithm = "HS256"
            token_ttl_secs = 3600
            nonce_ttl_secs = 60

            [database]
            url = "postgres://db/properties"
            max_connections = 8

            [sui]
            rpc_url = "https://fullnode.mainnet.sui.io:443"

            [ipfs]
            api_url = "http://ipfs:5001"
            gateway_url = "http://ipfs:8080"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert_eq!(config.sui.timeout_secs, None);
        assert_eq!(config.log_format, LogFormat::Auto);
    }

    #[test]
    fn default_leaves_secret_unset() {
        assert!(Config::default().auth.jwt_secret.is_empty());
    }
}
