use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use tracing::debug;

use crate::error::Error;
use crate::repository::User;
use crate::services::Services;

/// Axum extractor for the authenticated user.
///
/// Extracts the bearer token from the `Authorization` header, validates
/// it and resolves the subject address through the user directory. The
/// request is rejected with 401 before reaching the handler when the
/// token is missing or invalid.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    Services: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let services = Services::from_ref(state);

        let TypedHeader(auth) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    Error::Unauthorized("Missing authentication token".to_string())
                })?;

        let address = services.auth.decode_token(auth.token())?;

        let user = services
            .users
            .find_by_address(&address)
            .await?
            .ok_or_else(|| {
                debug!(target: "auth_service::current_user", address = %address, "token subject has no user record");
                Error::Unauthorized("Could not validate credentials".to_string())
            })?;

        Ok(Self(user))
    }
}
