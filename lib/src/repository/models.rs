//! Database record and input types for the listings repository.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{properties, user_favorites, users};

/// A registered user, keyed by Sui address.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub sui_address: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Input type for creating a user on first sign-in.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub sui_address: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Default profile for a first sign-in with the given address.
    pub fn for_address(address: &str) -> Self {
        Self {
            sui_address: address.to_string(),
            is_verified: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.avatar_url.is_none()
            && self.bio.is_none()
    }
}

/// A property listing.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,
    pub property_type: String,
    pub token_id: Option<String>,
    pub owner_address: String,
    pub is_listed: bool,
    pub images: Vec<String>,
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub owner_id: i64,
}

/// Input type for creating a property listing.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = properties)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub location: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: f64,
    pub property_type: String,
    pub token_id: Option<String>,
    pub owner_address: String,
    pub is_listed: bool,
    pub images: Vec<String>,
    pub documents: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

/// Partial property update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = properties)]
pub struct PropertyChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub location: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area: Option<f64>,
    pub property_type: Option<String>,
    pub token_id: Option<String>,
    pub is_listed: Option<bool>,
    pub images: Option<Vec<String>>,
    pub documents: Option<Vec<String>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PropertyChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.currency.is_none()
            && self.location.is_none()
            && self.bedrooms.is_none()
            && self.bathrooms.is_none()
            && self.area.is_none()
            && self.property_type.is_none()
            && self.token_id.is_none()
            && self.is_listed.is_none()
            && self.images.is_none()
            && self.documents.is_none()
    }
}

/// Input type for recording a favorite.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_favorites)]
pub struct NewFavorite {
    pub user_id: i64,
    pub property_id: i64,
    pub created_at: DateTime<Utc>,
}
