use axum::{extract::State, response::IntoResponse, Json};
use tracing::debug;

use crate::{
    error::Error,
    models::auth::{NonceResponse, VerifyRequest},
    services::Services,
};

pub async fn nonce(State(services): State<Services>) -> Result<impl IntoResponse, Error> {
    debug!("POST auth nonce");
    let nonce = services.auth.issue_nonce();
    Ok(Json(NonceResponse { nonce }))
}

pub async fn verify(
    State(services): State<Services>,
    Json(payload): Json<VerifyRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!(address = %payload.address, "POST auth verify");
    let response = services.auth.login(&payload).await?;
    Ok(Json(response))
}
