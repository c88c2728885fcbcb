use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Multipart;
use tracing::debug;

use crate::{
    error::Error,
    models::properties::{
        CreatePropertyRequest, DocumentUploadResponse, ImageUploadResponse, SearchQuery,
        UpdatePropertyRequest,
    },
    services::{auth::CurrentUser, Services},
};

pub async fn create_property(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, "POST properties");
    let response = services.properties.create(&user, payload).await?;
    Ok(Json(response))
}

pub async fn search_properties(
    State(services): State<Services>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, Error> {
    debug!(page = query.page, limit = query.limit, "GET properties");
    let response = services.properties.search(&query).await?;
    Ok(Json(response))
}

pub async fn get_property(
    State(services): State<Services>,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    debug!(property_id, "GET property");
    let response = services.properties.get(property_id).await?;
    Ok(Json(response))
}

pub async fn update_property(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "PUT property");
    let response = services
        .properties
        .update(property_id, &user, payload)
        .await?;
    Ok(Json(response))
}

pub async fn upload_images(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "POST property images");
    let files = collect_files(multipart).await?;
    let image_hashes = services
        .properties
        .attach_images(property_id, &user, files)
        .await?;
    Ok(Json(ImageUploadResponse { image_hashes }))
}

pub async fn upload_documents(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "POST property documents");
    let files = collect_files(multipart).await?;
    let document_hashes = services
        .properties
        .attach_documents(property_id, &user, files)
        .await?;
    Ok(Json(DocumentUploadResponse { document_hashes }))
}

pub async fn mint_property(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "POST property mint");
    services.properties.mint(property_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_property(
    State(services): State<Services>,
    CurrentUser(user): CurrentUser,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    debug!(user = %user.sui_address, property_id, "POST property list");
    services.properties.list_for_sale(property_id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drain a multipart body into (filename, bytes) pairs
async fn collect_files(mut multipart: Multipart) -> Result<Vec<(String, Vec<u8>)>, Error> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Error::BadRequest(format!("Invalid multipart body: {}", e)))?;
        files.push((filename, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(Error::BadRequest("No files provided".to_string()));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        api::mock_app,
        constants::mocks::{MOCK_ADDRESS, MOCK_ADDRESS_2},
        models::properties::{CreatePropertyRequest, PropertyResponse, UpdatePropertyRequest},
        test_utils::login,
    };

    fn listing(title: &str, price: f64) -> CreatePropertyRequest {
        CreatePropertyRequest {
            title: title.to_string(),
            description: "Two floors by the sea".to_string(),
            price,
            currency: "SUI".to_string(),
            location: "Lisbon".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            area: 120.0,
            property_type: "house".to_string(),
            images: vec![],
            documents: vec![],
        }
    }

    async fn create(server: &TestServer, token: &str, request: &CreatePropertyRequest) -> PropertyResponse {
        let response = server
            .post("/properties")
            .add_header("Authorization", format!("Bearer {token}"))
            .json(request)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        response.json()
    }

    #[tokio::test]
    async fn create_and_fetch_roundtrip() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        let created = create(&server, &token, &listing("Seaside house", 150.0)).await;
        assert_eq!(created.owner_address, MOCK_ADDRESS);
        assert_eq!(created.token_id, None);
        assert!(!created.is_listed);

        // public fetch, no auth needed
        let response = server.get(&format!("/properties/{}", created.id)).await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let fetched: PropertyResponse = response.json();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "Seaside house");
    }

    #[tokio::test]
    async fn fetch_missing_property_is_404() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/properties/999").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_requires_authentication() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/properties")
            .json(&listing("Seaside house", 150.0))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn search_filters_sorts_and_paginates() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        // 25 listings inside the price window, a few outside it
        for i in 0..25 {
            create(
                &server,
                &token,
                &listing(&format!("In range {i}"), 101.0 + i as f64),
            )
            .await;
        }
        create(&server, &token, &listing("Too cheap", 50.0)).await;
        create(&server, &token, &listing("Too expensive", 500.0)).await;

        let response = server
            .get("/properties")
            .add_query_param("min_price", "100")
            .add_query_param("max_price", "200")
            .add_query_param("sort_by", "price")
            .add_query_param("sort_order", "asc")
            .add_query_param("page", "2")
            .add_query_param("limit", "10")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let page: Vec<PropertyResponse> = response.json();

        // records 11-20 of the filtered ascending set: 111.0 ..= 120.0
        assert_eq!(page.len(), 10);
        let prices: Vec<f64> = page.iter().map(|p| p.price).collect();
        let expected: Vec<f64> = (10..20).map(|i| 101.0 + i as f64).collect();
        assert_eq!(prices, expected);
        assert!(page.iter().all(|p| p.price >= 100.0 && p.price <= 200.0));
    }

    #[tokio::test]
    async fn free_text_search_matches_title() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        create(&server, &token, &listing("Seaside house", 150.0)).await;
        create(&server, &token, &listing("Mountain cabin", 90.0)).await;

        let response = server
            .get("/properties")
            .add_query_param("query", "seaside")
            .await;
        let results: Vec<PropertyResponse> = response.json();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Seaside house");
    }

    #[tokio::test]
    async fn update_by_owner_is_partial() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        let created = create(&server, &token, &listing("Seaside house", 150.0)).await;

        let response = server
            .put(&format!("/properties/{}", created.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .json(&UpdatePropertyRequest {
                price: Some(180.0),
                ..Default::default()
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let updated: PropertyResponse = response.json();
        assert_eq!(updated.price, 180.0);
        assert_eq!(updated.title, "Seaside house");
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_by_non_owner_is_forbidden_and_changes_nothing() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();

        let owner_token = login(&server, MOCK_ADDRESS).await;
        let other_token = login(&server, MOCK_ADDRESS_2).await;

        let created = create(&server, &owner_token, &listing("Seaside house", 150.0)).await;

        let response = server
            .put(&format!("/properties/{}", created.id))
            .add_header("Authorization", format!("Bearer {other_token}"))
            .json(&UpdatePropertyRequest {
                title: Some("Hijacked".to_string()),
                price: Some(1.0),
                ..Default::default()
            })
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

        // nothing changed
        let response = server.get(&format!("/properties/{}", created.id)).await;
        let fetched: PropertyResponse = response.json();
        assert_eq!(fetched.title, "Seaside house");
        assert_eq!(fetched.price, 150.0);
        assert_eq!(fetched.updated_at, None);
    }

    #[tokio::test]
    async fn mint_is_gated_and_unimplemented() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();

        let owner_token = login(&server, MOCK_ADDRESS).await;
        let other_token = login(&server, MOCK_ADDRESS_2).await;

        let created = create(&server, &owner_token, &listing("Seaside house", 150.0)).await;

        // non-owner is rejected before the chain integration matters
        let response = server
            .post(&format!("/properties/{}/mint", created.id))
            .add_header("Authorization", format!("Bearer {other_token}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

        // owner reaches the unimplemented chain call
        let response = server
            .post(&format!("/properties/{}/mint", created.id))
            .add_header("Authorization", format!("Bearer {owner_token}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn list_requires_minted_property() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        let created = create(&server, &token, &listing("Seaside house", 150.0)).await;

        let response = server
            .post(&format!("/properties/{}/list", created.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn favorites_roundtrip() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        let created = create(&server, &token, &listing("Seaside house", 150.0)).await;

        let response = server
            .post(&format!("/users/me/favorites/{}", created.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let response = server
            .get("/users/me/favorites")
            .add_header("Authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let favorites: Vec<PropertyResponse> = response.json();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, created.id);

        let response = server
            .delete(&format!("/users/me/favorites/{}", created.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

        let response = server
            .delete(&format!("/users/me/favorites/{}", created.id))
            .add_header("Authorization", format!("Bearer {token}"))
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn favoriting_missing_property_is_404() {
        let app = mock_app();
        let server = TestServer::new(app).unwrap();
        let token = login(&server, MOCK_ADDRESS).await;

        let response = server
            .post("/users/me/favorites/999")
            .add_header("Authorization", format!("Bearer {token}"))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }
}
