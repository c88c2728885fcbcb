use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::debug;

use crate::{
    error::Error,
    models::users::{UpdateProfileRequest, UserResponse},
    services::{auth::CurrentUser, Services},
};

pub async fn me(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, "GET users me");
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_me(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, "PUT users me");
    let response = services.users.update_profile(user.id, payload).await?;
    Ok(Json(response))
}

pub async fn list_favorites(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, "GET users me favorites");
    let response = services.users.list_favorites(&user).await?;
    Ok(Json(response))
}

pub async fn add_favorite(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "POST users me favorites");
    services.users.add_favorite(&user, property_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_favorite(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "DELETE users me favorites");
    services.users.remove_favorite(&user, property_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        api::mock_app,
        constants::mocks::{MOCK_ADDRESS, MOCK_ADDRESS_2},
        models::users::{UpdateProfileRequest, UserResponse},
        test_utils::login,
    };

    #[tokio::test]
    async fn profile_can_be_updated() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        let response = server
            .put("/users/me")
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&UpdateProfileRequest {
                username: Some("alice".to_string()),
                bio: Some("Collector of seaside houses".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let user: UserResponse = response.json();
        assert_eq!(user.username.as_deref(), Some("alice"));
        assert_eq!(user.bio.as_deref(), Some("Collector of seaside houses"));
        assert!(user.updated_at.is_some());

        // email untouched by the partial update
        assert_eq!(user.email, None);
    }

    #[tokio::test]
    async fn taken_username_is_a_client_error() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();

        let token1 = login(&server, MOCK_ADDRESS).await;
        let token2 = login(&server, MOCK_ADDRESS_2).await;

        let response = server
            .put("/users/me")
            .add_header("Authorization", format!("Bearer {token1}"))
            .json(&UpdateProfileRequest {
                username: Some("alice".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = server
            .put("/users/me")
            .add_header("Authorization", format!("Bearer {token2}"))
            .json(&UpdateProfileRequest {
                username: Some("alice".to_string()),
                ..Default::default()
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_requires_authentication() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .put("/users/me")
            .json(&UpdateProfileRequest::default())
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
