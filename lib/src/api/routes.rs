//! Route definitions for the Property Finder API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::services::Services;

/// Creates the router with all API routes
pub fn routes(services: Services) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health))
        // Authentication
        .route("/auth/nonce", post(handlers::nonce))
        .route("/auth/verify", post(handlers::verify))
        // Current user
        .route("/users/me", get(handlers::me).put(handlers::update_me))
        .route("/users/me/favorites", get(handlers::list_favorites))
        .route(
            "/users/me/favorites/{property_id}",
            post(handlers::add_favorite).delete(handlers::remove_favorite),
        )
        // Property listings
        .route(
            "/properties",
            get(handlers::search_properties).post(handlers::create_property),
        )
        .route(
            "/properties/{property_id}",
            get(handlers::get_property).put(handlers::update_property),
        )
        .route("/properties/{property_id}/images", post(handlers::upload_images))
        .route(
            "/properties/{property_id}/documents",
            post(handlers::upload_documents),
        )
        .route("/properties/{property_id}/mint", post(handlers::mint_property))
        .route("/properties/{property_id}/list", post(handlers::list_property))
        // Add state to all routes
        .with_state(services)
}
