//! Property Finder Backend Binary
//!
//! Main entry point for the Property Finder backend service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
#[cfg(feature = "mocks")]
use pf_backend_lib::data::rpc::MockConnection;
#[cfg(feature = "mocks")]
use pf_backend_lib::repository::MockRepository;
use pf_backend_lib::{
    api::create_app,
    config::Config,
    data::{
        ipfs::{IpfsClient, MediaStorage},
        rpc::{AnyRpcConnection, HttpConnection, RpcConfig, SuiRpcClient},
    },
    log::initialize_logging,
    repository::{ListingsOps, Repository},
    services::Services,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "pf-backend")]
#[command(about = "Property Finder Backend Service", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Override Sui RPC URL
    #[arg(long)]
    sui_rpc_url: Option<String>,

    /// Override the JWT signing secret
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;

    initialize_logging(config.log_format);

    info!("Starting Property Finder Backend");
    info!("Server will run on {}:{}", config.host, config.port);

    let repository = create_repository(&config).await?;
    let rpc_client = create_rpc_client(&config)?;
    let media = create_media_storage(&config)?;

    let services = Services::new(&config, repository, rpc_client, media)
        .context("Failed to construct services")?;

    // Start server
    let app = create_app(services);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("Failed to bind TCP listener")?;

    info!("Server listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn load_config() -> Result<Config> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => {
            debug!("No config file specified, using defaults");
            Config::default()
        }
    };

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = database_url;
    }
    if let Some(sui_rpc_url) = args.sui_rpc_url {
        config.sui.rpc_url = sui_rpc_url;
    }
    if let Some(jwt_secret) = args.jwt_secret {
        config.auth.jwt_secret = jwt_secret;
    }

    Ok(config)
}

async fn create_repository(config: &Config) -> Result<Arc<dyn ListingsOps>> {
    #[cfg(feature = "mocks")]
    {
        if config.database.mock_mode {
            info!("Using mock repository (mock_mode enabled)");
            return Ok(Arc::new(MockRepository::new()));
        }
    }

    let repository = Repository::new(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create repository with database connection")?;

    // Test the connection
    repository
        .test_connection()
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("Connected to PostgreSQL database");
    Ok(Arc::new(repository))
}

fn create_rpc_client(config: &Config) -> Result<Arc<SuiRpcClient>> {
    #[cfg(feature = "mocks")]
    {
        if config.sui.mock_mode {
            info!("Using mock Sui RPC connection (mock_mode enabled)");

            let connection = MockConnection::new();
            let client = SuiRpcClient::new(Arc::new(AnyRpcConnection::Mock(connection)));

            return Ok(Arc::new(client));
        }
    }

    let rpc_config = RpcConfig {
        url: config.sui.rpc_url.clone(),
        timeout_secs: config.sui.timeout_secs,
    };

    let connection =
        HttpConnection::new(&rpc_config).context("Failed to create Sui RPC connection")?;
    let client = SuiRpcClient::new(Arc::new(AnyRpcConnection::Http(connection)));

    info!("Connected to Sui RPC at {}", config.sui.rpc_url);
    Ok(Arc::new(client))
}

fn create_media_storage(config: &Config) -> Result<Arc<dyn MediaStorage>> {
    let client = IpfsClient::new(&config.ipfs).context("Failed to create IPFS client")?;

    Ok(Arc::new(client))
}
