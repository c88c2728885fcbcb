use std::sync::Arc;

use serde::Serialize;

use crate::data::rpc::SuiRpcClient;
use crate::repository::ListingsOps;

#[derive(Serialize)]
pub struct DetailedHealthStatus {
    pub status: String,
    pub version: String,
    pub service: String,
    pub components: HealthComponents,
}

#[derive(Serialize)]
pub struct HealthComponents {
    pub database: ComponentHealth,
    pub rpc: ComponentHealth,
}

#[derive(Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct HealthService {
    repository: Arc<dyn ListingsOps>,
    rpc: Arc<SuiRpcClient>,
}

impl HealthService {
    pub fn new(repository: Arc<dyn ListingsOps>, rpc: Arc<SuiRpcClient>) -> Self {
        Self { repository, rpc }
    }

    pub async fn check_health(&self) -> DetailedHealthStatus {
        let database_health = self.check_database().await;
        let rpc_health = self.check_rpc().await;

        let overall_status = if database_health.status == "healthy" && rpc_health.status == "healthy"
        {
            "healthy"
        } else {
            "unhealthy"
        };

        DetailedHealthStatus {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: "property-finder-backend".to_string(),
            components: HealthComponents {
                database: database_health,
                rpc: rpc_health,
            },
        }
    }

    async fn check_database(&self) -> ComponentHealth {
        match self.repository.test_connection().await {
            Ok(_) => ComponentHealth {
                status: "healthy".to_string(),
                message: None,
            },
            Err(e) => ComponentHealth {
                status: "unhealthy".to_string(),
                message: Some(format!("Database error: {}", e)),
            },
        }
    }

    async fn check_rpc(&self) -> ComponentHealth {
        match self.rpc.is_connected().await {
            true => ComponentHealth {
                status: "healthy".to_string(),
                message: None,
            },
            false => ComponentHealth {
                status: "unhealthy".to_string(),
                message: Some("Sui RPC connection not established".to_string()),
            },
        }
    }
}
