use axum::{extract::State, response::IntoResponse, Json};

use crate::services::Services;

pub mod auth;
pub mod properties;
pub mod users;

pub use auth::*;
pub use properties::*;
pub use users::*;

pub async fn health(State(services): State<Services>) -> impl IntoResponse {
    Json(services.health.check_health().await)
}
